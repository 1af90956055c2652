//! Core engine — the fetch → compute → hand-off pipeline for one report.

pub mod report;
