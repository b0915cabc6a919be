//! The generation pipeline: notation line → tokens → trees → sentences.
//!
//! `LanguageGenerator` owns the token parser and the whitelist table, and
//! drives whole input streams line by line.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::builder::build_forest;
use crate::core::config::{ConfigError, GeneratorConfig, RoleWhitelist};
use crate::core::parser::{ParseError, TokenParser};
use crate::core::sentence::{EventKind, Sentence};
use crate::schema::entity::FieldError;
use crate::schema::tree::ParseForest;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything produced from one input line.
#[derive(Debug, Clone)]
pub struct Generation {
    pub forest: ParseForest,
    /// One per recognized event root, in root order.
    pub sentences: Vec<Sentence>,
}

impl Generation {
    pub fn rendered(&self) -> Vec<String> {
        self.sentences.iter().map(Sentence::render).collect()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &FieldError> {
        self.sentences.iter().flat_map(|s| s.diagnostics.iter())
    }

    /// Every tree of the line, each followed by a blank line.
    pub fn tree_dump(&self) -> String {
        let mut out = String::new();
        for &root in self.forest.roots() {
            out.push_str(&self.forest.render(root));
            out.push('\n');
        }
        out
    }
}

/// Counts from a `run_lines` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: usize,
    pub sentences: usize,
    pub failed_lines: usize,
}

/// The top-level generator. Built via `LanguageGenerator::builder()`.
pub struct LanguageGenerator {
    parser: TokenParser,
    config: GeneratorConfig,
}

/// Builder for constructing a `LanguageGenerator`.
pub struct LanguageGeneratorBuilder {
    show_tree: Option<bool>,
    config_file: Option<PathBuf>,
    /// Directly provided config (for testing without files).
    config: Option<GeneratorConfig>,
    whitelist: Vec<(EventKind, RoleWhitelist)>,
}

impl LanguageGenerator {
    pub fn builder() -> LanguageGeneratorBuilder {
        LanguageGeneratorBuilder {
            show_tree: None,
            config_file: None,
            config: None,
            whitelist: Vec::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Parse one line and assemble a sentence for each recognized root.
    /// Roots of any other type are skipped without error.
    pub fn generate(&mut self, line: &str) -> Result<Generation, ParseError> {
        let tokens = self.parser.parse(line)?;
        let forest = build_forest(tokens);

        let sentences = forest
            .roots()
            .iter()
            .filter_map(|&root| {
                let kind = EventKind::from_token(forest.token(root))?;
                let rules = self.config.whitelist.for_event(kind);
                Some(Sentence::assemble(&forest, root, kind, rules))
            })
            .collect();

        Ok(Generation { forest, sentences })
    }

    /// Run every line of `input`. Sentences (and trees, when enabled) go to
    /// `out`; a line that fails to parse writes one diagnostic to `err` and
    /// the run moves on. Only a failure to read or write ends the run.
    pub fn run_lines<R, W, E>(
        &mut self,
        input: R,
        mut out: W,
        mut err: E,
    ) -> Result<RunSummary, PipelineError>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut summary = RunSummary::default();
        // Invalid UTF-8 is decoded lossily; only a failed read ends the run.
        for raw in input.split(b'\n') {
            let raw = raw?;
            let decoded = String::from_utf8_lossy(&raw);
            let line: &str = decoded.strip_suffix('\r').unwrap_or(&decoded);
            summary.lines += 1;

            match self.generate(line) {
                Ok(generation) => {
                    for sentence in generation.rendered() {
                        writeln!(out, "{}", sentence)?;
                    }
                    summary.sentences += generation.sentences.len();

                    for diagnostic in generation.diagnostics() {
                        writeln!(err, "Error: {}", diagnostic)?;
                    }

                    if self.config.show_tree {
                        writeln!(out, "{}", generation.tree_dump())?;
                    }
                }
                Err(e) => {
                    summary.failed_lines += 1;
                    writeln!(err, "Error: {}", e)?;
                }
            }
        }
        out.flush()?;
        Ok(summary)
    }
}

impl LanguageGeneratorBuilder {
    pub fn show_tree(mut self, show: bool) -> Self {
        self.show_tree = Some(show);
        self
    }

    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Provide a config directly (for testing without files).
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the whitelist for one event kind.
    pub fn with_whitelist(mut self, kind: EventKind, rules: RoleWhitelist) -> Self {
        self.whitelist.push((kind, rules));
        self
    }

    pub fn build(self) -> Result<LanguageGenerator, PipelineError> {
        // A config file replaces any directly provided config
        let mut config = match self.config_file {
            Some(ref path) => GeneratorConfig::load_from_ron(path)?,
            None => self.config.unwrap_or_default(),
        };

        config
            .whitelist
            .merge(self.whitelist.into_iter().collect());

        if let Some(show) = self.show_tree {
            config.show_tree = show;
        }

        Ok(LanguageGenerator {
            parser: TokenParser::new(),
            config,
        })
    }
}
