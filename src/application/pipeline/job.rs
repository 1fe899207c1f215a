//! One bundling job and its cycles

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::ProjectContext;
use crate::domain::entities::{Bundle, ModuleUnit, OutputChunk};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{path_to_slash, replace_extension};
use crate::error::{BuildError, BuildResult};

use super::graph::GraphLoader;
use super::phase::{CycleContext, PhaseSlot};
use super::phases::ASSERTED_OUTPUT_SUFFIX;

/// Counters of one successful cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleStats {
    /// Source modules in the graph
    pub modules: usize,
    /// Chunks written to disk
    pub written: usize,
    /// Chunks dropped by the output cache
    pub suppressed: usize,
}

/// Result handle of one cycle.
///
/// Must be closed before the next cycle starts. Dropping an open handle
/// closes it as well.
#[derive(Debug)]
pub struct BundleHandle {
    cycle: u64,
    open: Arc<AtomicUsize>,
    closed: bool,
}

impl BundleHandle {
    fn open(cycle: u64, open: Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self {
            cycle,
            open,
            closed: false,
        }
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.closed {
            self.closed = true;
            self.open.fetch_sub(1, Ordering::SeqCst);
            log::trace!("closed bundle handle of cycle {}", self.cycle);
        }
    }
}

impl Drop for BundleHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Everything a finished cycle reports, success or not
#[derive(Debug)]
pub struct CycleReport {
    pub handle: BundleHandle,
    pub warnings: Vec<String>,
    pub duration: Duration,
    pub result: BuildResult<CycleStats>,
}

pub struct BuildJob {
    project: ProjectContext,
    fs: Box<dyn FileSystem>,
    phases: Vec<PhaseSlot>,
    cycle: u64,
    open_handles: Arc<AtomicUsize>,
}

impl BuildJob {
    pub fn new(project: ProjectContext, fs: Box<dyn FileSystem>, phases: Vec<PhaseSlot>) -> Self {
        Self {
            project,
            fs,
            phases,
            cycle: 0,
            open_handles: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn project(&self) -> &ProjectContext {
        &self.project
    }

    /// Names of the phases that run in this job's mode, in order
    pub fn active_phases(&self) -> Vec<&'static str> {
        self.phases
            .iter()
            .filter(|slot| slot.active)
            .map(|slot| slot.name())
            .collect()
    }

    /// Handles returned by [`run_cycle`](Self::run_cycle) and not yet closed
    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }

    pub fn cycles(&self) -> u64 {
        self.cycle
    }

    /// Run one full cycle. Errors are captured in the report, never raised.
    pub fn run_cycle(&mut self) -> CycleReport {
        self.cycle += 1;
        let handle = BundleHandle::open(self.cycle, Arc::clone(&self.open_handles));
        let started = Instant::now();
        log::debug!("cycle {} started", self.cycle);

        let mut cx = CycleContext::new(&self.project, self.fs.as_ref());
        let result = drive(&mut self.phases, &mut cx);
        let warnings = std::mem::take(&mut cx.warnings);

        if let Err(e) = &result {
            log::debug!("cycle {} failed: {}", self.cycle, e);
        }
        CycleReport {
            handle,
            warnings,
            duration: started.elapsed(),
            result,
        }
    }
}

fn active(phases: &mut [PhaseSlot]) -> impl Iterator<Item = &mut PhaseSlot> {
    phases.iter_mut().filter(|slot| slot.active)
}

/// Attribute environment failures to the phase they happened in
fn in_phase(name: &'static str) -> impl Fn(BuildError) -> BuildError {
    move |err| match err {
        BuildError::Io(_) | BuildError::Fs(_) | BuildError::Json(_) => {
            BuildError::phase(name, err.to_string())
        }
        other => other,
    }
}

fn drive(phases: &mut [PhaseSlot], cx: &mut CycleContext<'_>) -> BuildResult<CycleStats> {
    for slot in active(phases) {
        log::debug!("build_start: {}", slot.name());
        slot.phase.build_start(cx).map_err(in_phase(slot.name()))?;
    }

    let entry = cx
        .entry
        .take()
        .ok_or_else(|| BuildError::phase("entry-points", "no entry module was produced"))?;
    let mut loader_warnings = Vec::new();
    let graph = GraphLoader::new(cx.fs, &cx.source_root, &cx.project.config)
        .load(entry, &mut |w| loader_warnings.push(w))?;
    for warning in loader_warnings {
        cx.warn(warning);
    }

    for slot in active(phases) {
        slot.phase.graph_loaded(&graph, cx).map_err(in_phase(slot.name()))?;
    }

    let mut bundle = Bundle::new();
    for module in graph.modules() {
        let mut code = module.contents().to_string();
        for slot in active(phases) {
            code = slot.phase.transform(module, code, cx)?;
        }
        let file_name = output_name(module, &cx.source_root, cx.assertions.contains(module.path()));
        bundle.insert(OutputChunk::new(file_name, code, module.path()));
    }

    for chunk in bundle.chunks_mut() {
        for slot in active(phases) {
            slot.phase.render_chunk(chunk, cx)?;
        }
    }

    let emitted = bundle.len();
    for slot in active(phases) {
        slot.phase
            .generate_bundle(&mut bundle, cx)
            .map_err(in_phase(slot.name()))?;
    }
    let suppressed = emitted - bundle.len();

    for chunk in bundle.chunks() {
        cx.fs.write(&cx.out_dir.join(chunk.file_name()), chunk.code())?;
    }

    for slot in active(phases) {
        slot.phase
            .write_bundle(&bundle, cx)
            .map_err(in_phase(slot.name()))?;
    }

    Ok(CycleStats {
        modules: graph.len(),
        written: bundle.len(),
        suppressed,
    })
}

/// Preserve-modules output name, relative to the output root
fn output_name(module: &ModuleUnit, source_root: &Path, asserted: bool) -> String {
    let relative = module
        .path()
        .strip_prefix(source_root)
        .map(path_to_slash)
        .unwrap_or_else(|_| path_to_slash(module.path()));

    if asserted {
        return format!("{}{}", relative, ASSERTED_OUTPUT_SUFFIX);
    }
    replace_extension(&relative, "ts", "js")
        .or_else(|| replace_extension(&relative, "tsx", "js"))
        .or_else(|| replace_extension(&relative, "mts", "mjs"))
        .unwrap_or(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pipeline::phases::{standard_phases, Toolchain};
    use crate::domain::value_objects::BuildMode;
    use crate::infrastructure::compiler::PassthroughTranspiler;
    use crate::infrastructure::fs::LocalFs;
    use crate::infrastructure::minify::{CssMinifier, HtmlLiteralMinifier, WhitespaceJsMinifier};
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn fixture(mode: BuildMode) -> (tempfile::TempDir, BuildJob) {
        let dir = tempdir().unwrap();
        write(dir.path(), "package.json", r#"{ "name": "lib", "version": "3.0.1" }"#);
        write(dir.path(), "src/alert/index.ts", "export * from './element.js';\n");
        write(
            dir.path(),
            "src/alert/element.ts",
            "import styles from './element.css' with { type: 'css' };\n\
             /** @element ui-alert */\n\
             export class Alert extends HTMLElement {\n  static styles = [styles];\n  version = 'PACKAGE_VERSION';\n}\n",
        );
        write(dir.path(), "src/alert/element.css", ":host {\n  display: block;\n}\n");

        let mut project = ProjectContext::with_defaults(dir.path(), mode);
        project.package.version = Some("3.0.1".to_string());
        let toolchain = Toolchain {
            transpiler: Box::new(PassthroughTranspiler),
            css_minifier: Box::new(CssMinifier),
            js_minifier: Box::new(WhitespaceJsMinifier),
            html_minifier: Box::new(HtmlLiteralMinifier),
            type_checker: None,
        };
        let phases = standard_phases(&project, toolchain);
        (dir, BuildJob::new(project, Box::new(LocalFs::new()), phases))
    }

    #[test]
    fn production_cycle_writes_modules_and_manifest() {
        let (dir, mut job) = fixture(BuildMode::Production);
        let report = job.run_cycle();
        let stats = report.result.unwrap();
        report.handle.close();

        assert_eq!(stats.modules, 3);
        assert_eq!(stats.written, 3);
        let dist = dir.path().join("dist");
        assert!(dist.join("alert/index.js").exists());
        assert!(dist.join("alert/element.css.js").exists());
        assert!(dist.join("custom-elements.json").exists());

        let element = fs::read_to_string(dist.join("alert/element.js")).unwrap();
        assert!(element.contains("./element.css.js"));
        assert!(!element.contains("type:"));
        assert!(element.contains("3.0.1"));
    }

    #[test]
    fn development_rebuild_suppresses_unchanged_chunks() {
        let (_dir, mut job) = fixture(BuildMode::Development);

        let first = job.run_cycle();
        assert_eq!(first.result.as_ref().unwrap().written, 3);
        first.handle.close();

        let second = job.run_cycle();
        let stats = second.result.as_ref().unwrap();
        assert_eq!(stats.written, 0);
        assert_eq!(stats.suppressed, 3);
        second.handle.close();
        assert_eq!(job.open_handles(), 0);
    }

    #[test]
    fn failed_cycle_writes_no_manifest() {
        let (dir, mut job) = fixture(BuildMode::Production);
        write(dir.path(), "src/alert/index.ts", "export * from './missing.js';\n");

        let report = job.run_cycle();
        assert!(matches!(report.result, Err(BuildError::Resolve { .. })));
        drop(report);

        assert!(!dir.path().join("dist/custom-elements.json").exists());
        assert_eq!(job.open_handles(), 0);
    }

    #[test]
    fn output_names_follow_preserve_modules() {
        let root = Path::new("/lib/src");
        let script = ModuleUnit::new("/lib/src/alert/element.ts", "");
        let style = ModuleUnit::new("/lib/src/alert/element.css", "");
        let runtime = ModuleUnit::new("/lib/src/worker.mts", "");

        assert_eq!(output_name(&script, root, false), "alert/element.js");
        assert_eq!(output_name(&style, root, true), "alert/element.css.js");
        assert_eq!(output_name(&runtime, root, false), "worker.mjs");
    }
}
