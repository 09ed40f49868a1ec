use async_trait::async_trait;
use curtain_core::Mutation;
use tokio::sync::mpsc;

/// A standing subscription to structural changes on the observed container.
///
/// The host environment delivers batches of change records; the subscription
/// ends when the producer goes away.
#[async_trait]
pub trait MutationSource: Send {
    /// The next batch of reported changes, or `None` once the producer has
    /// been dropped.
    async fn next_batch(&mut self) -> Option<Vec<Mutation>>;
}

/// A mutation source fed through an mpsc channel. The sending half plays the
/// role of the host's observer callback.
pub struct ChannelSource {
    receiver: mpsc::Receiver<Vec<Mutation>>,
}

impl ChannelSource {
    pub fn new(receiver: mpsc::Receiver<Vec<Mutation>>) -> Self {
        Self { receiver }
    }

    /// A connected sender/source pair.
    pub fn channel(capacity: usize) -> (mpsc::Sender<Vec<Mutation>>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx))
    }
}

#[async_trait]
impl MutationSource for ChannelSource {
    async fn next_batch(&mut self) -> Option<Vec<Mutation>> {
        // recv is cancel safe, so racing this against the tick never loses
        // a batch.
        self.receiver.recv().await
    }
}
