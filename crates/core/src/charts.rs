//! Acquisition of chart images rendered by an external chart widget.
//!
//! The caller hands in an ordered list of [`ChartSlot`]s. A slot is either
//! already resolved or waits on a [`ChartReadiness`] handle that the chart
//! producer completes once its surface is drawn. All pending slots share one
//! deadline; whatever is not ready by then is left out of the report.

use crate::error::SkipReason;
use crate::labels::ReportLabels;
use smartspend_resource::decode_image;
use smartspend_types::EncodedImage;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{Instant, timeout_at};

/// Most charts a single report embeds.
pub const MAX_CHARTS: usize = 4;

/// Raw output of the chart widget: encoded image bytes (PNG or JPEG) plus the
/// pixel size of the surface it was drawn on.
#[derive(Clone, PartialEq, Eq)]
pub struct RenderedSurface {
    pub image_data: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

impl RenderedSurface {
    pub fn new(image_data: Vec<u8>, width_px: u32, height_px: u32) -> Self {
        Self {
            image_data,
            width_px,
            height_px,
        }
    }

    /// Reads the pixel size from the image header. Bytes that are not a
    /// recognisable image give a zero-sized surface, which collection skips.
    pub fn from_encoded(image_data: Vec<u8>) -> Self {
        let (width_px, height_px) = image::ImageReader::new(std::io::Cursor::new(&image_data))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok())
            .unwrap_or((0, 0));
        Self::new(image_data, width_px, height_px)
    }

    pub fn is_empty(&self) -> bool {
        self.width_px == 0 || self.height_px == 0
    }
}

impl fmt::Debug for RenderedSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedSurface")
            .field("bytes", &self.image_data.len())
            .field("width_px", &self.width_px)
            .field("height_px", &self.height_px)
            .finish()
    }
}

type Readiness = Result<RenderedSurface, String>;

/// One chart position in the gallery.
#[derive(Debug)]
pub struct ChartSlot {
    state: SlotState,
}

#[derive(Debug)]
enum SlotState {
    Ready(RenderedSurface),
    Pending(oneshot::Receiver<Readiness>),
}

impl ChartSlot {
    pub fn ready(surface: RenderedSurface) -> Self {
        Self {
            state: SlotState::Ready(surface),
        }
    }

    /// A slot that resolves when the returned handle is completed.
    pub fn pending() -> (Self, ChartReadiness) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                state: SlotState::Pending(rx),
            },
            ChartReadiness { tx },
        )
    }
}

/// Producer side of a pending [`ChartSlot`]. Dropping it without completing
/// marks the slot as never ready.
#[derive(Debug)]
pub struct ChartReadiness {
    tx: oneshot::Sender<Readiness>,
}

impl ChartReadiness {
    pub fn complete(self, surface: RenderedSurface) {
        if self.tx.send(Ok(surface)).is_err() {
            log::debug!("Chart surface completed after the report stopped waiting");
        }
    }

    pub fn fail(self, reason: impl Into<String>) {
        if self.tx.send(Err(reason.into())).is_err() {
            log::debug!("Chart failure reported after the report stopped waiting");
        }
    }
}

/// A titled chart ready for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSurface {
    pub title: String,
    pub image: Arc<EncodedImage>,
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollectedChart {
    Embedded(ChartSurface),
    /// The surface was valid but could not be converted; the gallery prints a
    /// placeholder line in its place.
    Failed { title: String, reason: String },
}

impl CollectedChart {
    pub fn title(&self) -> &str {
        match self {
            CollectedChart::Embedded(surface) => &surface.title,
            CollectedChart::Failed { title, .. } => title,
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, CollectedChart::Embedded(_))
    }
}

#[derive(Debug, Default)]
pub struct ChartCollection {
    pub charts: Vec<CollectedChart>,
    pub skipped: Vec<SkipReason>,
}

impl ChartCollection {
    pub fn embedded(&self) -> usize {
        self.charts.iter().filter(|c| c.is_embedded()).count()
    }
}

pub struct ChartCollector {
    ready_timeout: Duration,
    labels: ReportLabels,
}

impl ChartCollector {
    pub fn new(ready_timeout: Duration, labels: ReportLabels) -> Self {
        Self {
            ready_timeout,
            labels,
        }
    }

    /// Awaits the slots in order and titles the valid surfaces by position.
    /// Only embedded charts take a title and count toward [`MAX_CHARTS`]. A
    /// surface that fails to encode is reported under the title the next
    /// embedded chart will receive.
    pub async fn collect(&self, slots: Vec<ChartSlot>) -> ChartCollection {
        let deadline = Instant::now() + self.ready_timeout;
        let offered = slots.len();
        let mut collection = ChartCollection::default();

        for (index, slot) in slots.into_iter().enumerate() {
            if collection.embedded() >= MAX_CHARTS {
                log::debug!(
                    "Chart cap of {} reached, ignoring {} remaining slot(s)",
                    MAX_CHARTS,
                    offered - index
                );
                break;
            }

            let surface = match Self::await_slot(slot, deadline).await {
                Ok(surface) => surface,
                Err(reason) => {
                    collection.skipped.push(SkipReason::ChartNotReady { index, reason });
                    continue;
                }
            };

            if surface.is_empty() {
                collection.skipped.push(SkipReason::ChartEmpty { index });
                continue;
            }

            let title = self.labels.chart_title(collection.embedded());
            match decode_image(&surface.image_data) {
                Ok(image) => {
                    log::debug!("Collected '{}' ({}x{})", title, image.width, image.height);
                    collection.charts.push(CollectedChart::Embedded(ChartSurface {
                        title,
                        width_px: image.width,
                        height_px: image.height,
                        image: Arc::new(image),
                    }));
                }
                Err(e) => {
                    let reason = e.to_string();
                    collection.skipped.push(SkipReason::ChartEncoding {
                        title: title.clone(),
                        reason: reason.clone(),
                    });
                    collection.charts.push(CollectedChart::Failed { title, reason });
                }
            }
        }

        log::info!(
            "Chart collection: {} offered, {} embedded, {} skipped",
            offered,
            collection.embedded(),
            collection.skipped.len()
        );
        collection
    }

    async fn await_slot(slot: ChartSlot, deadline: Instant) -> Result<RenderedSurface, String> {
        match slot.state {
            SlotState::Ready(surface) => Ok(surface),
            SlotState::Pending(rx) => match timeout_at(deadline, rx).await {
                Ok(Ok(readiness)) => readiness,
                Ok(Err(_)) => Err("producer went away without a surface".to_string()),
                Err(_) => Err("not ready before the deadline".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Locale;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_surface(w: u32, h: u32) -> RenderedSurface {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([20, 120, 220, 255])))
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        RenderedSurface::from_encoded(out.into_inner())
    }

    fn collector() -> ChartCollector {
        ChartCollector::new(Duration::from_millis(1000), ReportLabels::for_locale(Locale::En))
    }

    fn titles(collection: &ChartCollection) -> Vec<&str> {
        collection.charts.iter().map(|c| c.title()).collect()
    }

    #[test]
    fn probes_dimensions_from_the_header() {
        let surface = png_surface(6, 4);
        assert_eq!((surface.width_px, surface.height_px), (6, 4));
        assert!(RenderedSurface::from_encoded(b"nope".to_vec()).is_empty());
    }

    #[tokio::test]
    async fn titles_follow_position_and_cap_at_four() {
        let slots = (0..6).map(|_| ChartSlot::ready(png_surface(4, 4))).collect();
        let collection = collector().collect(slots).await;

        assert_eq!(
            titles(&collection),
            vec!["Income Chart", "Expense Chart", "Line Chart", "Bar Chart"]
        );
        assert_eq!(collection.embedded(), 4);
    }

    #[tokio::test]
    async fn empty_surfaces_do_not_consume_titles() {
        let slots = vec![
            ChartSlot::ready(RenderedSurface::new(vec![], 0, 300)),
            ChartSlot::ready(png_surface(4, 4)),
        ];
        let collection = collector().collect(slots).await;

        assert_eq!(titles(&collection), vec!["Income Chart"]);
        assert_eq!(collection.skipped, vec![SkipReason::ChartEmpty { index: 0 }]);
    }

    fn garbage_surface() -> RenderedSurface {
        RenderedSurface::new(b"garbage".to_vec(), 400, 300)
    }

    #[tokio::test]
    async fn encoding_failures_do_not_consume_titles() {
        let slots = vec![ChartSlot::ready(garbage_surface()), ChartSlot::ready(png_surface(4, 4))];
        let collection = collector().collect(slots).await;

        assert!(matches!(&collection.charts[0], CollectedChart::Failed { title, .. } if title == "Income Chart"));
        assert!(matches!(&collection.charts[1], CollectedChart::Embedded(s) if s.title == "Income Chart"));
        assert!(matches!(collection.skipped[0], SkipReason::ChartEncoding { .. }));
    }

    #[tokio::test]
    async fn encoding_failures_do_not_count_toward_the_cap() {
        let mut slots: Vec<ChartSlot> = (0..4).map(|_| ChartSlot::ready(garbage_surface())).collect();
        slots.push(ChartSlot::ready(png_surface(4, 4)));
        let collection = collector().collect(slots).await;

        assert_eq!(collection.embedded(), 1);
        assert_eq!(collection.charts.len(), 5);
        assert!(matches!(&collection.charts[4], CollectedChart::Embedded(s) if s.title == "Income Chart"));
        assert_eq!(collection.skipped.len(), 4);
    }

    #[tokio::test]
    async fn cap_counts_embedded_charts_only() {
        let mut slots = vec![ChartSlot::ready(garbage_surface())];
        slots.extend((0..5).map(|_| ChartSlot::ready(png_surface(4, 4))));
        let collection = collector().collect(slots).await;

        assert_eq!(collection.embedded(), 4);
        assert_eq!(collection.charts.len(), 5);
        assert_eq!(
            titles(&collection),
            vec!["Income Chart", "Income Chart", "Expense Chart", "Line Chart", "Bar Chart"]
        );
    }

    #[tokio::test]
    async fn pending_slots_resolve_when_completed() {
        let (slot, readiness) = ChartSlot::pending();
        let surface = png_surface(3, 3);
        tokio::spawn(async move { readiness.complete(surface) });

        let collection = collector().collect(vec![slot]).await;
        assert_eq!(collection.embedded(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_charts_are_skipped_at_the_deadline() {
        let (slow, slow_handle) = ChartSlot::pending();
        let (failed, failed_handle) = ChartSlot::pending();
        let (dropped, dropped_handle) = ChartSlot::pending();
        failed_handle.fail("canvas was never drawn");
        drop(dropped_handle);

        let started = Instant::now();
        let collection = collector()
            .collect(vec![slow, failed, dropped, ChartSlot::ready(png_surface(2, 2))])
            .await;

        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(titles(&collection), vec!["Income Chart"]);
        assert_eq!(collection.skipped.len(), 3);
        assert!(collection
            .skipped
            .iter()
            .all(|r| matches!(r, SkipReason::ChartNotReady { .. })));
        drop(slow_handle);
    }

    #[tokio::test]
    async fn no_slots_no_charts() {
        let collection = collector().collect(Vec::new()).await;
        assert!(collection.charts.is_empty());
        assert!(collection.skipped.is_empty());
    }
}
