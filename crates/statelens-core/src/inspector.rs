//! Inspector facade.
//!
//! Wraps every top-level operation with structured start/end log events. One
//! inspector is one comparison session: all its operations share a trace id,
//! and each operation gets its own request id.

use crate::config::InspectorConfig;
use crate::diff::{build_report, diff_trees, DiffReport, Divergence};
use crate::errors::{ExError, LensError};
use crate::model::{LiveNode, Snapshot};
use crate::render::{
    emit_all, not_found_notice, render_fragment, render_live, render_tree_with, Line,
    LiveTreeOptions, Sink, TreeOptions,
};
use crate::sanitize::Sanitizer;
use crate::traversal::{extract, find_component, fragment_members, FRAGMENT_MARKER};
use crate::{log_op_end, log_op_error, log_op_start};
use statelens_core_types::{RequestContext, TraceId};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct Inspector {
    config: InspectorConfig,
    sanitizer: Sanitizer,
    trace_id: TraceId,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(InspectorConfig::default())
    }
}

impl Inspector {
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            sanitizer: Sanitizer::new(&config),
            config,
            trace_id: TraceId::new(),
        }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn trace_id(&self) -> &TraceId {
        &self.trace_id
    }

    fn context(&self) -> RequestContext {
        RequestContext::new().with_trace_id(self.trace_id.clone())
    }

    /// Extract a sanitized snapshot; `None` when there is no root
    pub fn extract<N: LiveNode>(&self, root: Option<&N>) -> Option<Snapshot> {
        let ctx = self.context();
        log_op_start!(
            "extract_snapshot",
            request_id = ctx.request_id.as_str(),
            trace_id = self.trace_id.as_str()
        );
        let start = Instant::now();

        let snapshot = extract(root, &self.sanitizer);
        if snapshot.is_none() {
            tracing::debug!(request_id = ctx.request_id.as_str(), "no root to extract");
        }

        log_op_end!(
            "extract_snapshot",
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str(),
            node_count = snapshot.as_ref().map_or(0, Snapshot::node_count)
        );
        snapshot
    }

    /// Positional diff of two snapshots
    pub fn compare(&self, current: &Snapshot, other: &Snapshot) -> Vec<Divergence> {
        let ctx = self.context();
        log_op_start!(
            "compare_snapshots",
            request_id = ctx.request_id.as_str(),
            trace_id = self.trace_id.as_str()
        );
        let start = Instant::now();

        let divergences = diff_trees(current, other);

        log_op_end!(
            "compare_snapshots",
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str(),
            divergence_count = divergences.len()
        );
        divergences
    }

    /// Diff with identity block, classification and counts
    pub fn report(&self, current: &Snapshot, other: &Snapshot) -> DiffReport {
        let ctx = self.context();
        log_op_start!(
            "report",
            request_id = ctx.request_id.as_str(),
            trace_id = self.trace_id.as_str()
        );
        let start = Instant::now();

        let report = build_report(current, other);

        log_op_end!(
            "report",
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str(),
            divergence_count = report.divergences.len(),
            classification = ?report.classification
        );
        report
    }

    /// Render a snapshot annotated with `divergences`, labelled from config
    ///
    /// A missing snapshot renders as the not-found notice.
    pub fn render(&self, root: Option<&Snapshot>, divergences: &[Divergence]) -> Vec<Line> {
        let ctx = self.context();
        log_op_start!(
            "render_tree",
            request_id = ctx.request_id.as_str(),
            trace_id = self.trace_id.as_str()
        );
        let start = Instant::now();

        let lines = match root {
            Some(root) => {
                render_tree_with(root, divergences, &TreeOptions::from_config(&self.config))
            }
            None => vec![not_found_notice()],
        };

        log_op_end!(
            "render_tree",
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str(),
            line_count = lines.len()
        );
        lines
    }

    /// Render the live tree
    ///
    /// Without `app`, drawing starts at the component named like the root
    /// label when one lies on the first-child chain, and at `root` otherwise.
    ///
    /// # Errors
    ///
    /// `NotFound` when `app` names a component absent from the first-child
    /// chain.
    pub fn render_live<N: LiveNode>(
        &self,
        root: Option<&N>,
        app: Option<&str>,
    ) -> Result<Vec<Line>, ExError> {
        let ctx = self.context();
        log_op_start!(
            "render_live",
            request_id = ctx.request_id.as_str(),
            trace_id = self.trace_id.as_str()
        );
        let start = Instant::now();

        let Some(root) = root else {
            log_op_end!(
                "render_live",
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = ctx.request_id.as_str(),
                line_count = 1
            );
            return Ok(vec![not_found_notice()]);
        };

        let top = match app {
            Some(name) => match find_component(root, name) {
                Some(node) => node,
                None => return Err(self.component_not_found("render_live", name, &ctx, start)),
            },
            None => find_component(root, &self.config.root_label).unwrap_or_else(|| root.clone()),
        };

        let lines = render_live(&top, &LiveTreeOptions::from_config(&self.config));

        log_op_end!(
            "render_live",
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str(),
            line_count = lines.len()
        );
        Ok(lines)
    }

    /// List the fragment members under the component `name`
    ///
    /// The listing covers the sibling chain of the component's first child.
    /// A component without children yields the fragment marker alone.
    ///
    /// # Errors
    ///
    /// `NotFound` when `name` is absent from the first-child chain.
    pub fn fragment<N: LiveNode>(
        &self,
        root: Option<&N>,
        name: &str,
    ) -> Result<Vec<Line>, ExError> {
        let ctx = self.context();
        log_op_start!(
            "render_fragment",
            request_id = ctx.request_id.as_str(),
            trace_id = self.trace_id.as_str()
        );
        let start = Instant::now();

        let Some(component) = root.and_then(|root| find_component(root, name)) else {
            return Err(self.component_not_found("render_fragment", name, &ctx, start));
        };

        let members = match component.first_child() {
            Some(first) => fragment_members(&first),
            None => vec![FRAGMENT_MARKER.to_string()],
        };
        let lines = render_fragment(&members);

        log_op_end!(
            "render_fragment",
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str(),
            line_count = lines.len()
        );
        Ok(lines)
    }

    fn component_not_found(
        &self,
        op: &'static str,
        name: &str,
        ctx: &RequestContext,
        start: Instant,
    ) -> ExError {
        let err = ExError::from(LensError::ComponentNotFound {
            name: name.to_string(),
        })
        .with_op(op)
        .with_request_id(ctx.request_id.clone())
        .with_trace_id(self.trace_id.clone());
        log_op_error!(
            op,
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        err
    }

    /// Deliver rendered lines to a sink
    ///
    /// # Errors
    ///
    /// The first error reported by the sink.
    pub fn deliver<S: Sink + ?Sized>(&self, sink: &mut S, lines: &[Line]) -> Result<(), ExError> {
        emit_all(sink, lines).map_err(|e| {
            let err = e.with_trace_id(self.trace_id.clone());
            log_op_error!("emit", err.clone(), duration_ms = 0u64);
            err
        })
    }
}
