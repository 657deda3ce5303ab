//! Swap coordinator: converts an arbitrary supported asset into the
//! settlement asset through the external router, trusting only the
//! measured custody delta.

use harbor_core::{AssetId, OwnerId, VaultError, VaultResult};
use harbor_ports::{AssetTransfer, SwapRouter};
use log::{debug, warn};

/// Pull `amount_in` of `asset_in` from `owner`, run one router
/// invocation into `settlement`, and return the amount of settlement
/// asset actually received, measured as the before/after difference in
/// the ledger's own custody.
///
/// On router failure or a zero measured delta the pulled input is
/// returned to the owner and the operation fails with `SwapFailed`.
/// No retry, no partial-fill handling; slippage bounding is the
/// router's problem, so `min_amount_out` is passed as zero.
pub(crate) fn execute_swap(
    transfers: &dyn AssetTransfer,
    router: &dyn SwapRouter,
    owner: &OwnerId,
    asset_in: &AssetId,
    amount_in: u128,
    settlement: &AssetId,
) -> VaultResult<u128> {
    transfers
        .pull(asset_in, owner, amount_in)
        .map_err(|err| VaultError::TransferFailed(err.to_string()))?;

    let before = transfers.holdings(settlement);
    if let Err(err) = router.swap(asset_in, settlement, amount_in, 0) {
        warn!("router failed swapping {amount_in} {asset_in}: {err}");
        transfers
            .push(asset_in, owner, amount_in)
            .map_err(|err| VaultError::TransferFailed(err.to_string()))?;
        return Err(VaultError::SwapFailed(err.to_string()));
    }

    let received = transfers.holdings(settlement).saturating_sub(before);
    if received == 0 {
        warn!("router reported success but delivered no {settlement}");
        transfers
            .push(asset_in, owner, amount_in)
            .map_err(|err| VaultError::TransferFailed(err.to_string()))?;
        return Err(VaultError::SwapFailed(
            "router produced no settlement output".to_string(),
        ));
    }

    debug!("swapped {amount_in} {asset_in} into {received} {settlement} (measured)");
    Ok(received)
}
