pub mod detector_trait;
pub mod null_detector;
#[cfg(feature = "onnx")]
pub mod onnx_detector;
pub mod postprocess;
pub mod registry;

pub use detector_trait::WatermarkDetector;
pub use null_detector::NullDetector;
#[cfg(feature = "onnx")]
pub use onnx_detector::OnnxDetector;
pub use registry::DetectorRegistry;
