use curtain_core::{DotAnimator, MountWatcher, PageTree, ScreenConfig, ScreenError};
use tokio::time::{Instant, interval_at};

use crate::source::MutationSource;

/// Why the loading screen stopped running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The mount element appeared; the overlay was removed.
    MountDetected,
    /// The mutation source closed before the application mounted. The overlay
    /// is left in place.
    SourceClosed,
}

/// Drives the loading screen for one page: animates the dot label every tick
/// and watches structural changes for the application's mount element, then
/// tears everything down in one shot.
#[derive(Debug)]
pub struct LoadingScreen<T: PageTree> {
    tree: T,
    config: ScreenConfig,
    animator: DotAnimator,
    watcher: MountWatcher,
}

impl<T: PageTree> LoadingScreen<T> {
    /// Attach to a page. All three required elements are looked up once, here;
    /// if any is missing the feature is disabled: a diagnostic is logged, the
    /// error is returned, and neither the timer nor the subscription ever
    /// starts.
    pub fn attach(tree: T, config: ScreenConfig) -> Result<Self, ScreenError> {
        for id in config.required_ids() {
            if !tree.element_exists(id) {
                tracing::error!(id, "can't find loading screen elements");
                return Err(ScreenError::MissingElement(id.to_string()));
            }
        }

        let watcher = MountWatcher::new(&config.mount_tag);
        Ok(Self {
            tree,
            config,
            animator: DotAnimator::new(),
            watcher,
        })
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Run until the application mounts or the source closes.
    ///
    /// Single task, run to completion: the tick and the batch handler never
    /// overlap, and returning drops both the interval and the subscription,
    /// so teardown releases each exactly once before any later tick could
    /// fire. If the mount element never appears and the source stays open,
    /// this runs forever and the overlay is never removed.
    pub async fn run<S: MutationSource>(mut self, mut source: S) -> Outcome {
        let period = self.config.tick_interval;
        // First tick one full period after start.
        let mut ticks = interval_at(Instant::now() + period, period);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    self.animator.render_tick(&self.tree, &self.config.dots_id);
                }
                batch = source.next_batch() => match batch {
                    Some(mutations) => {
                        for node in mutations.iter().flat_map(|m| m.added.iter()) {
                            tracing::debug!(?node, "added node");
                        }
                        if self.watcher.sees_mount(&mutations) {
                            // The application has mounted; the overlay is no
                            // longer needed.
                            self.tree.remove_element(&self.config.overlay_id);
                            tracing::info!(
                                overlay = %self.config.overlay_id,
                                "application mounted, loading screen removed"
                            );
                            return Outcome::MountDetected;
                        }
                    }
                    None => {
                        tracing::debug!("mutation source closed before the application mounted");
                        return Outcome::SourceClosed;
                    }
                },
            }
        }
    }
}
