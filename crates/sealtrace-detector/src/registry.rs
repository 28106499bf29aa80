use crate::detector_trait::WatermarkDetector;
use sealtrace_core::DetectorError;
use std::collections::HashMap;

pub struct DetectorRegistry {
    factories: HashMap<String, fn() -> Box<dyn WatermarkDetector>>,
}

impl DetectorRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("null", || Box::new(crate::null_detector::NullDetector::new()));
        #[cfg(feature = "onnx")]
        registry.register("onnx", || {
            Box::new(crate::onnx_detector::OnnxDetector::new())
        });
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn WatermarkDetector>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn WatermarkDetector>, DetectorError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| DetectorError::EngineNotFound(name.to_string()))
    }

    /// Create the named detector and initialize it with `config`.
    pub fn load(
        &self,
        name: &str,
        config: toml::Value,
    ) -> Result<Box<dyn WatermarkDetector>, DetectorError> {
        let mut detector = self.create(name)?;
        detector.initialize(config)?;
        tracing::info!("detector '{}' loaded", detector.name());
        Ok(detector)
    }

    pub fn list_engines(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stands in for a model-backed engine registered by a caller.
    struct FixedScoreDetector;

    impl WatermarkDetector for FixedScoreDetector {
        fn name(&self) -> &str {
            "fixed"
        }

        fn initialize(&mut self, _config: toml::Value) -> Result<(), DetectorError> {
            Ok(())
        }

        fn detect(
            &mut self,
            _audio: &sealtrace_core::AudioBuffer,
        ) -> Result<sealtrace_core::Detection, DetectorError> {
            Ok(sealtrace_core::Detection {
                score: 1.0,
                bits: vec![1; 16],
            })
        }
    }

    #[test]
    fn test_null_engine_is_always_available() {
        let registry = DetectorRegistry::new();
        let detector = registry.create("null").unwrap();
        assert_eq!(detector.name(), "null");
    }

    #[test]
    fn test_unknown_engine_names_the_request() {
        let registry = DetectorRegistry::new();
        match registry.create("audioseal_detector_32bits") {
            Err(DetectorError::EngineNotFound(name)) => {
                assert_eq!(name, "audioseal_detector_32bits")
            }
            _ => panic!("expected EngineNotFound error"),
        }
    }

    #[test]
    fn test_registered_engine_is_created_by_its_factory() {
        let mut registry = DetectorRegistry::new();
        registry.register("fixed", || Box::new(FixedScoreDetector));
        let mut detector = registry.create("fixed").unwrap();
        let detection = detector
            .detect(&sealtrace_core::AudioBuffer::mono(vec![0.0; 16], 16000))
            .unwrap();
        assert_eq!(detection.score, 1.0);
        assert_eq!(detection.bits.len(), 16);
    }

    #[test]
    fn test_reregistering_a_name_replaces_the_engine() {
        let mut registry = DetectorRegistry::new();
        registry.register("null", || Box::new(FixedScoreDetector));
        let detector = registry.create("null").unwrap();
        assert_eq!(detector.name(), "fixed");
    }

    #[test]
    fn test_list_engines_is_sorted() {
        let mut registry = DetectorRegistry::new();
        registry.register("fixed", || Box::new(FixedScoreDetector));
        let engines = registry.list_engines();
        let mut sorted = engines.clone();
        sorted.sort_unstable();
        assert_eq!(engines, sorted);
        assert!(engines.contains(&"fixed"));
        assert!(engines.contains(&"null"));
    }

    #[cfg(feature = "onnx")]
    #[test]
    fn test_registry_has_onnx_when_enabled() {
        let registry = DetectorRegistry::new();
        assert!(registry.list_engines().contains(&"onnx"));
    }

    #[test]
    fn test_registry_load_initializes_detector() {
        let registry = DetectorRegistry::new();
        let mut config = toml::map::Map::new();
        config.insert("score".to_string(), toml::Value::Float(0.9));
        let mut detector = registry.load("null", toml::Value::Table(config)).unwrap();
        let detection = detector
            .detect(&sealtrace_core::AudioBuffer::mono(vec![0.0; 16], 16000))
            .unwrap();
        assert!((detection.score - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_registry_load_propagates_initialize_error() {
        let registry = DetectorRegistry::new();
        let mut config = toml::map::Map::new();
        config.insert("bits".to_string(), toml::Value::Integer(5));
        let result = registry.load("null", toml::Value::Table(config));
        assert!(matches!(result, Err(DetectorError::InitializationFailed(_))));
    }
}
