//! Analyzer tests against in-memory service handles.

mod analyzer_flow;
