//! Pagination engine
//!
//! Derived, read-only computation: given the measured pixel height of
//! the rendered resume and the document's page padding, produce the
//! vertical offsets where A4 page breaks fall, so the preview can
//! overlay "end of page N" markers.
//!
//! The math is pure; [`spawn_pagination_task`] wraps it in a
//! coalesced recompute loop fed by measurement events from the
//! rendering collaborator and publishes offsets through a `watch`
//! channel.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::coalesce;

/// Physical A4 page height
const A4_HEIGHT_MM: f64 = 297.0;

/// Fixed px-per-mm conversion used by the rendering surface
const MM_TO_PX: f64 = 3.78;

/// Marker cap: documents beyond this many breaks render no further
/// markers. Bounds worst-case marker rendering for pathological
/// content; explicitly a degradation, not an error.
const MAX_PAGE_BREAKS: usize = 20;

/// Default coalescing window for measurement bursts
pub const MEASURE_WINDOW: Duration = Duration::from_millis(50);

/// Printable page height in px for a given page padding (px)
///
/// The padding is converted to mm, subtracted from the physical
/// height, and the remainder converted back to px.
pub fn page_height_px(page_padding_px: f64) -> f64 {
    let padding_mm = page_padding_px / MM_TO_PX;
    (A4_HEIGHT_MM - padding_mm) * MM_TO_PX
}

/// Number of pages the measured content spans (at least 1)
///
/// A zero, negative, or NaN measurement counts as a single page:
/// measurement anomalies are "nothing to break", never a fault.
pub fn page_count(content_height_px: f64, page_padding_px: f64) -> usize {
    if !content_height_px.is_finite() || content_height_px <= 0.0 {
        return 1;
    }
    let page_height = page_height_px(page_padding_px);
    if page_height <= 0.0 {
        return 1;
    }
    (content_height_px / page_height).ceil().max(1.0) as usize
}

/// Vertical offsets of the page-break markers, capped at
/// [`MAX_PAGE_BREAKS`]
///
/// Break `k` sits at `page_height_px * k`. For a fixed padding the
/// number of breaks is non-decreasing in `content_height_px`, and is
/// zero whenever the content fits on one page.
pub fn page_break_offsets(content_height_px: f64, page_padding_px: f64) -> Vec<f64> {
    let breaks = page_count(content_height_px, page_padding_px) - 1;
    let page_height = page_height_px(page_padding_px);
    (1..=breaks.min(MAX_PAGE_BREAKS))
        .map(|k| page_height * k as f64)
        .collect()
}

/// A content measurement reported by the rendering collaborator
///
/// Re-sent whenever the rendered content structurally changes or
/// resizes; bursts are coalesced before recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Total rendered content height in px
    pub content_height_px: f64,
    /// Page padding of the active document in px
    pub page_padding_px: f64,
}

/// Spawn the coalesced recompute task.
///
/// Measurement events arriving within [`MEASURE_WINDOW`] of one
/// another collapse to the last one; each settled measurement
/// publishes a fresh offset list on the returned `watch` channel.
/// The task ends when the measurement channel closes.
pub fn spawn_pagination_task(
    measure_rx: mpsc::UnboundedReceiver<Measurement>,
) -> (watch::Receiver<Vec<f64>>, JoinHandle<()>) {
    let (breaks_tx, breaks_rx) = watch::channel(Vec::new());

    let handle = coalesce::spawn_coalesced(MEASURE_WINDOW, measure_rx, move |m: Measurement| {
        let offsets = page_break_offsets(m.content_height_px, m.page_padding_px);
        debug!(
            height = m.content_height_px,
            breaks = offsets.len(),
            "recomputed page breaks"
        );
        // Receiver gone just means no preview is listening
        let _ = breaks_tx.send(offsets);
    });

    (breaks_rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_height_subtracts_padding() {
        let full = page_height_px(0.0);
        assert!((full - A4_HEIGHT_MM * MM_TO_PX).abs() < 1e-9);

        let padded = page_height_px(32.0);
        assert!(padded < full);
        assert!((full - padded - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_content_fitting_one_page_has_no_breaks() {
        let page_height = page_height_px(32.0);
        assert_eq!(page_count(page_height - 1.0, 32.0), 1);
        assert!(page_break_offsets(page_height - 1.0, 32.0).is_empty());
        assert!(page_break_offsets(page_height, 32.0).is_empty());
    }

    #[test]
    fn test_zero_height_yields_no_breaks() {
        assert_eq!(page_count(0.0, 32.0), 1);
        assert!(page_break_offsets(0.0, 32.0).is_empty());
    }

    #[test]
    fn test_negative_and_nan_heights_yield_no_breaks() {
        assert!(page_break_offsets(-500.0, 32.0).is_empty());
        assert!(page_break_offsets(f64::NAN, 32.0).is_empty());
        assert!(page_break_offsets(f64::INFINITY, 32.0).is_empty());
    }

    #[test]
    fn test_break_offsets_are_page_multiples() {
        let page_height = page_height_px(32.0);
        let offsets = page_break_offsets(page_height * 2.5, 32.0);

        assert_eq!(offsets.len(), 2);
        assert!((offsets[0] - page_height).abs() < 1e-9);
        assert!((offsets[1] - page_height * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_break_count_is_monotone_in_height() {
        let mut last = 0;
        for step in 0..50 {
            let height = step as f64 * 300.0;
            let breaks = page_break_offsets(height, 32.0).len();
            assert!(breaks >= last, "breaks decreased at height {}", height);
            last = breaks;
        }
    }

    #[test]
    fn test_breaks_capped_at_twenty() {
        let page_height = page_height_px(32.0);
        let offsets = page_break_offsets(page_height * 1000.0, 32.0);
        assert_eq!(offsets.len(), MAX_PAGE_BREAKS);
    }

    #[test]
    fn test_pathological_padding_degrades_to_one_page() {
        // Padding larger than the page itself
        assert_eq!(page_count(5000.0, A4_HEIGHT_MM * MM_TO_PX * 2.0), 1);
    }

    #[tokio::test]
    async fn test_task_publishes_latest_measurement() {
        let (tx, rx) = mpsc::unbounded_channel();
        let (mut breaks_rx, handle) = spawn_pagination_task(rx);

        let page_height = page_height_px(32.0);
        // Burst: only the last should matter
        tx.send(Measurement {
            content_height_px: page_height * 10.0,
            page_padding_px: 32.0,
        })
        .unwrap();
        tx.send(Measurement {
            content_height_px: page_height * 3.5,
            page_padding_px: 32.0,
        })
        .unwrap();
        drop(tx);

        handle.await.unwrap();
        breaks_rx.changed().await.unwrap();
        assert_eq!(breaks_rx.borrow().len(), 3);
    }
}
