//! ReferenceEngine: JS entry point
//!
//! ```javascript,ignore
//! const engine = new ReferenceEngine({ weighted: true });
//! const analysis = engine.analyze({ owner: 'd3', repo: 'd3', tables: [...] });
//! console.log(engine.summary());
//! ```

use wasm_bindgen::prelude::*;

use crate::config::AnalysisConfig;
use crate::project::{Project, ProjectAnalyzer};
use crate::report::Report;

#[wasm_bindgen]
pub struct ReferenceEngine {
    analyzer: ProjectAnalyzer,
    last_report: Option<Report>,
}

#[wasm_bindgen]
impl ReferenceEngine {
    /// `config` may be omitted, `null`, or a partial config object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ReferenceEngine, JsValue> {
        let config = if config.is_null() || config.is_undefined() {
            AnalysisConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| fail("Failed to parse config", e))?
        };
        let analyzer = ProjectAnalyzer::new(config).map_err(|e| fail("Invalid config", e))?;
        Ok(Self { analyzer, last_report: None })
    }

    /// Analyze one project object `{ owner, repo, tables: [{ kind, rows }] }`
    #[wasm_bindgen(js_name = analyze)]
    pub fn js_analyze(&mut self, project: JsValue) -> Result<JsValue, JsValue> {
        let project: Project =
            serde_wasm_bindgen::from_value(project).map_err(|e| fail("Failed to parse project", e))?;
        let analysis = self.analyzer.analyze(&project).map_err(|e| fail("Analysis failed", e))?;
        let value = serde_wasm_bindgen::to_value(&analysis).map_err(|e| fail("Serialization failed", e))?;
        self.last_report = Some(analysis.report);
        Ok(value)
    }

    /// Same as `analyze`, with JSON text on both sides
    #[wasm_bindgen(js_name = analyzeJson)]
    pub fn js_analyze_json(&mut self, project_json: &str) -> Result<String, JsValue> {
        let project: Project =
            serde_json::from_str(project_json).map_err(|e| fail("Failed to parse project", e))?;
        let analysis = self.analyzer.analyze(&project).map_err(|e| fail("Analysis failed", e))?;
        let out = serde_json::to_string(&analysis).map_err(|e| fail("Serialization failed", e))?;
        self.last_report = Some(analysis.report);
        Ok(out)
    }

    /// Text summary of the last analyzed project, empty before the first
    #[wasm_bindgen]
    pub fn summary(&self) -> String {
        self.last_report.as_ref().map(|r| r.to_string()).unwrap_or_default()
    }
}

fn fail(context: &str, err: impl std::fmt::Display) -> JsValue {
    let message = format!("[ReferenceEngine] {}: {}", context, err);
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}
