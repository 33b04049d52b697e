//! Minimum-output guard derived from a quote.

use votepool_types::{apply_bps, BPS_DENOMINATOR};

/// Smallest output accepted for a `quote` with `max_slippage_bps` tolerance.
///
/// `None` if the tolerance exceeds 100%.
pub fn min_output_for(quote: u128, max_slippage_bps: u32) -> Option<u128> {
    let keep_bps = (BPS_DENOMINATOR as u32).checked_sub(max_slippage_bps)?;
    apply_bps(quote, keep_bps)
}
