//! WASM bindings for lang-generator: powers the in-browser notation demo.

use wasm_bindgen::prelude::*;

use lang_generator::core::config::GeneratorConfig;
use lang_generator::core::parser::TokenParser;
use lang_generator::core::pipeline::LanguageGenerator;
use lang_generator::core::sentence::EventKind;
use lang_generator::schema::token::ParseToken;

// Compiled into the WASM binary
const DEFAULT_CONFIG: &str = include_str!("../../config/default.ron");

#[derive(serde::Serialize)]
struct GenerationOutput {
    sentences: Vec<String>,
    diagnostics: Vec<String>,
}

#[wasm_bindgen]
pub struct GeneratorDemo {
    generator: LanguageGenerator,
    parser: TokenParser,
}

#[wasm_bindgen]
impl GeneratorDemo {
    /// Create a demo instance using the bundled default config.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<GeneratorDemo, JsError> {
        let config = GeneratorConfig::parse_ron(DEFAULT_CONFIG)
            .map_err(|e| JsError::new(&format!("Config parse error: {e}")))?;
        let generator = LanguageGenerator::builder()
            .with_config(config)
            .build()
            .map_err(|e| JsError::new(&format!("Generator build error: {e}")))?;
        Ok(GeneratorDemo {
            generator,
            parser: TokenParser::new(),
        })
    }

    /// Render one notation line.
    ///
    /// Returns JSON of the shape
    /// ```json
    /// { "sentences": ["WTB 2 Swords."], "diagnostics": [] }
    /// ```
    pub fn generate(&mut self, line: &str) -> Result<String, JsError> {
        let generation = self
            .generator
            .generate(line)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let output = GenerationOutput {
            sentences: generation.rendered(),
            diagnostics: generation.diagnostics().map(|d| d.to_string()).collect(),
        };
        serde_json::to_string(&output)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Tab-indented parse trees for one line.
    pub fn tree(&mut self, line: &str) -> Result<String, JsError> {
        let generation = self
            .generator
            .generate(line)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(generation.tree_dump())
    }

    /// The flat token list for one line, as a JSON array.
    pub fn tokens(&mut self, line: &str) -> Result<String, JsError> {
        let tokens: Vec<ParseToken> = self
            .parser
            .parse(line)
            .map_err(|e| JsError::new(&e.to_string()))?;
        serde_json::to_string(&tokens)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Names of the events the generator recognizes.
    pub fn event_kinds() -> String {
        serde_json::to_string(&EventKind::ALL)
            .unwrap_or_else(|_| "[]".to_string())
    }
}
