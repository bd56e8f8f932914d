use crate::model::{PricedPledge, StorageError};

#[async_trait::async_trait]
pub trait PledgeSource: Send + Sync {
    /// Returns every pledge row for the campaign, each joined to the pledging
    /// user's intensity tag. Implementations may pre-filter rows with no price
    /// ceiling; the engine drops them either way. Row order must be the
    /// original pledge order.
    async fn list_priced_pledges(
        &self,
        campaign_id: i64,
    ) -> Result<Vec<PricedPledge>, StorageError>;
}
