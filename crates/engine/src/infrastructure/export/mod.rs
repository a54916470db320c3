pub mod rtf_exporter;

pub use rtf_exporter::RtfExporter;
