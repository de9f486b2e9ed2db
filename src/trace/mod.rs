//! Trace Module
//!
//! Call counting and call history for named operations, and the replay report
//! built from them.

mod recorder;
mod report;


pub use recorder::{
    clip_rendered, inputs_key, outputs_key, render_args, FnOperation, Traceable, TraceableExt,
    WithCounting, WithHistory, MAX_RENDERED_LEN,
};
pub use report::{replay, CallHistory};
