//! Dependency-tracked recomputation of everything a frame needs.
//!
//! Inputs are the filtered samples, the field selection, the viewport and the
//! zoom transform. A [`Frame`] is recomputed in full whenever any of them
//! changed since the last call to [`Pipeline::frame`], and reused otherwise.

use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::log::{Sample, fields_only, max_time};
use crate::path::{RenderedPath, generate_path};
use crate::range::{FieldMap, RangeOrigin, scan_ranges};
use crate::scale::{AxisScales, Viewport};
use crate::selection::{FieldSelection, MAX_FIELDS, OverflowPolicy, bound_selection};
use crate::zoom::ZoomTransform;

/// Tunables for the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineOptions {
    pub max_fields: usize,
    pub palette_size: usize,
    pub range_origin: RangeOrigin,
    pub overflow: OverflowPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_fields: MAX_FIELDS,
            palette_size: MAX_FIELDS,
            range_origin: RangeOrigin::default(),
            overflow: OverflowPolicy::default(),
        }
    }
}

/// Fully derived render output for one set of inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    fields: FieldMap,
    scales: AxisScales,
    paths: Vec<RenderedPath>,
    diagnostics: Vec<Diagnostic>,
}

impl Frame {
    /// Descriptor mapping keyed by field label.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn scales(&self) -> &AxisScales {
        &self.scales
    }

    /// One path per selection entry, in paint order.
    pub fn paths(&self) -> &[RenderedPath] {
        &self.paths
    }

    /// Anomalies recovered while computing this frame.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Compute a frame from scratch. Plot-ready (field-kind) samples only.
pub fn render(
    samples: &[Sample],
    selection: &[FieldSelection],
    viewport: Viewport,
    transform: Option<&ZoomTransform>,
    options: &PipelineOptions,
) -> Frame {
    let fields = scan_ranges(
        samples,
        selection,
        options.range_origin,
        options.palette_size,
    );
    let scales = AxisScales::build(max_time(samples), &fields, viewport, transform);

    let mut diagnostics = Vec::new();
    let mut paths = Vec::with_capacity(selection.len());
    for field in selection {
        let (Some(descriptor), Some(y)) = (fields.get(&field.label), scales.y_for(&field.label))
        else {
            continue;
        };

        let (path, missing) = generate_path(samples, field, descriptor.color, &scales.x, y);
        let reported = diagnostics.iter().any(
            |d| matches!(d, Diagnostic::MissingField { label, .. } if *label == field.label),
        );
        if missing > 0 && !reported {
            tracing::warn!(
                field = %field.label,
                samples = missing,
                "Field doesn't exist in this log, plotting as 0"
            );
            diagnostics.push(Diagnostic::MissingField {
                label: field.label.clone(),
                samples: missing,
            });
        }
        paths.push(path);
    }

    Frame {
        fields,
        scales,
        paths,
        diagnostics,
    }
}

#[derive(Debug, Clone, PartialEq)]
struct RenderKey {
    data: u64,
    selection: u64,
    viewport: Viewport,
    transform: Option<ZoomTransform>,
}

/// Owns the current inputs and the last computed frame.
#[derive(Debug)]
pub struct Pipeline {
    options: PipelineOptions,
    samples: Vec<Sample>,
    selection: Vec<FieldSelection>,
    selection_notice: Option<Diagnostic>,
    viewport: Viewport,
    transform: Option<ZoomTransform>,
    data_generation: u64,
    selection_generation: u64,
    cached: Option<(RenderKey, Frame)>,
    recomputes: u64,
}

impl Pipeline {
    pub fn new(viewport: Viewport, options: PipelineOptions) -> Self {
        Self {
            options,
            samples: Vec::new(),
            selection: Vec::new(),
            selection_notice: None,
            viewport,
            transform: None,
            data_generation: 0,
            selection_generation: 0,
            cached: None,
            recomputes: 0,
        }
    }

    /// Replace the log data. Non-field records are dropped here.
    pub fn set_samples(&mut self, samples: &[Sample]) {
        self.samples = fields_only(samples);
        self.data_generation += 1;
    }

    /// Replace the selection, applying the field bound policy.
    ///
    /// Under [`OverflowPolicy::Reject`] an oversized selection is refused
    /// and the previous one stays in effect.
    pub fn set_selection(&mut self, selection: Vec<FieldSelection>) -> Result<()> {
        let (selection, notice) =
            bound_selection(selection, self.options.max_fields, self.options.overflow)?;
        if selection != self.selection || notice != self.selection_notice {
            self.selection = selection;
            self.selection_notice = notice;
            self.selection_generation += 1;
        }
        Ok(())
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_transform(&mut self, transform: Option<ZoomTransform>) {
        self.transform = transform;
    }

    /// Plot-ready samples currently loaded.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Selection in effect after the bound policy.
    pub fn selection(&self) -> &[FieldSelection] {
        &self.selection
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn transform(&self) -> Option<ZoomTransform> {
        self.transform
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Number of full recomputations performed so far.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Last computed frame, which may predate the latest input change.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.cached.as_ref().map(|(_, frame)| frame)
    }

    /// Frame for the current inputs, recomputed only if any input changed.
    pub fn frame(&mut self) -> &Frame {
        let key = RenderKey {
            data: self.data_generation,
            selection: self.selection_generation,
            viewport: self.viewport,
            transform: self.transform,
        };
        if self.cached.as_ref().is_some_and(|(cached, _)| *cached != key) {
            self.cached = None;
        }

        let (_, frame) = self.cached.get_or_insert_with(|| {
            self.recomputes += 1;
            tracing::debug!(
                samples = self.samples.len(),
                fields = self.selection.len(),
                "Recomputing plot frame"
            );
            let mut frame = render(
                &self.samples,
                &self.selection,
                self.viewport,
                self.transform.as_ref(),
                &self.options,
            );
            if let Some(notice) = &self.selection_notice {
                frame.diagnostics.insert(0, notice.clone());
            }
            (key, frame)
        });
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> Pipeline {
        let mut pipeline = Pipeline::new(Viewport::new(100.0, 50.0), PipelineOptions::default());
        pipeline.set_samples(&[
            Sample::field().with("Time", 0.0).with("RPM", 1000.0),
            Sample::marker().with("Time", 0.5),
            Sample::field().with("Time", 1.0).with("RPM", 2000.0),
        ]);
        pipeline
            .set_selection(vec![FieldSelection::new("rpm", "RPM")])
            .unwrap();
        pipeline
    }

    #[test]
    fn test_markers_filtered() {
        let pipeline = pipeline();
        assert_eq!(pipeline.samples().len(), 2);
    }

    #[test]
    fn test_frame_cached_until_input_changes() {
        let mut pipeline = pipeline();

        assert!(pipeline.last_frame().is_none());
        pipeline.frame();
        pipeline.frame();
        assert_eq!(pipeline.recompute_count(), 1);
        assert!(pipeline.last_frame().is_some());

        pipeline.set_transform(Some(ZoomTransform::new(2.0, 0.0, 0.0)));
        pipeline.frame();
        assert_eq!(pipeline.recompute_count(), 2);

        // Same selection again does not invalidate.
        pipeline
            .set_selection(vec![FieldSelection::new("rpm", "RPM")])
            .unwrap();
        pipeline.frame();
        assert_eq!(pipeline.recompute_count(), 2);

        pipeline.set_viewport(Viewport::new(200.0, 50.0));
        pipeline.frame();
        assert_eq!(pipeline.recompute_count(), 3);
    }

    #[test]
    fn test_removed_field_leaves_no_descriptor() {
        let mut pipeline = pipeline();
        pipeline
            .set_selection(vec![
                FieldSelection::new("rpm", "RPM"),
                FieldSelection::new("map", "MAP"),
            ])
            .unwrap();
        assert_eq!(pipeline.frame().fields().len(), 2);

        pipeline
            .set_selection(vec![FieldSelection::new("map", "MAP")])
            .unwrap();
        let frame = pipeline.frame();
        assert_eq!(frame.fields().len(), 1);
        assert!(frame.fields().contains_key("MAP"));
    }

    #[test]
    fn test_missing_field_reported_once() {
        let mut pipeline = pipeline();
        pipeline
            .set_selection(vec![
                FieldSelection::new("afr", "AFR"),
                FieldSelection::new("afr2", "AFR"),
            ])
            .unwrap();

        let frame = pipeline.frame();
        assert_eq!(frame.paths().len(), 2);
        assert_eq!(
            frame.diagnostics(),
            &[Diagnostic::MissingField {
                label: "AFR".to_string(),
                samples: 2
            }]
        );
    }
}
