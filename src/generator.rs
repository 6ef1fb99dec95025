//! Manifest Generator
//!
//! Runs a full generation pass: validate the template, expand it over the
//! configured regions, partition the result, then write the combined
//! manifest followed by one manifest per step.

use log::info;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::manifest::{partition, DocumentStore, ManifestWriter};
use crate::workflow::validator::validate_workflow;
use crate::workflow::{expand, Template, Workflow};

/// Summary of a completed generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Document names in the order they were written
    pub documents: Vec<String>,

    /// Number of regions the template was expanded over
    pub regions: usize,

    /// Total tasks in the combined manifest
    pub tasks: usize,
}

/// Generates and writes all manifests for one template.
///
/// # Example
///
/// ```
/// use planet_workflow::config::GeneratorConfig;
/// use planet_workflow::manifest::MemoryStore;
/// use planet_workflow::Generator;
///
/// let mut generator = Generator::new(GeneratorConfig::default(), MemoryStore::new());
/// let report = generator.run().unwrap();
/// assert_eq!(report.documents.len(), 4);
/// ```
pub struct Generator<S> {
    config: GeneratorConfig,
    template: Template,
    writer: ManifestWriter<S>,
}

impl<S: DocumentStore> Generator<S> {
    /// Creates a generator over the built-in prototype and the configured regions.
    pub fn new(config: GeneratorConfig, store: S) -> Self {
        let template = Template::with_regions(config.regions.clone());
        Self::with_template(config, template, store)
    }

    /// Creates a generator over an explicit template. The template's region
    /// list takes precedence over `config.regions`.
    pub fn with_template(config: GeneratorConfig, template: Template, store: S) -> Self {
        Self {
            config,
            template,
            writer: ManifestWriter::new(store),
        }
    }

    /// Validates and expands the template without writing anything.
    pub fn build(&self) -> Result<Workflow> {
        validate_workflow(self.template.workflow())?;
        expand(&self.template)
    }

    /// Executes a full generation pass.
    ///
    /// The first failure aborts the run; documents written before it are
    /// left in place.
    pub fn run(&mut self) -> Result<GenerationReport> {
        info!(
            "Generating manifests for {} regions",
            self.template.regions().len()
        );

        let expanded = self.build()?;
        let mut documents = Vec::new();

        let name = self.config.workflow_manifest_name();
        self.writer.write(&name, &expanded)?;
        documents.push(name);

        for part in partition(&expanded) {
            let name = self.config.step_manifest_name(&part.step_id);
            self.writer.write(&name, &part.workflow)?;
            documents.push(name);
        }

        info!("Generation complete: {} manifests written", documents.len());

        Ok(GenerationReport {
            documents,
            regions: self.template.regions().len(),
            tasks: expanded.task_count(),
        })
    }

    pub fn store(&self) -> &S {
        self.writer.store()
    }

    pub fn into_store(self) -> S {
        self.writer.into_store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::manifest::{FsStore, MemoryStore};
    use crate::workflow::template::PROTOTYPE;
    use crate::workflow::{Step, Task};
    use std::io;
    use tempfile::tempdir;

    /// Accepts a fixed number of writes, then fails.
    struct FlakyStore {
        inner: MemoryStore,
        remaining: usize,
    }

    impl DocumentStore for FlakyStore {
        fn persist(&mut self, name: &str, contents: &str) -> io::Result<()> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.remaining -= 1;
            self.inner.persist(name, contents)
        }
    }

    fn config_for(regions: &[&str]) -> GeneratorConfig {
        GeneratorConfig {
            regions: regions.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    fn parse(store: &MemoryStore, name: &str) -> Workflow {
        serde_json::from_str(store.get(name).unwrap()).unwrap()
    }

    #[test]
    fn test_run_writes_all_documents() {
        let mut generator = Generator::new(GeneratorConfig::default(), MemoryStore::new());
        let report = generator.run().unwrap();

        assert_eq!(
            report.documents,
            vec![
                "planet-workflow.json",
                "planet-download.json",
                "planet-import.json",
                "planet-index.json",
            ]
        );
        assert_eq!(report.regions, 8);
        assert_eq!(report.tasks, 17);
        assert_eq!(generator.store().len(), 4);
    }

    #[test]
    fn test_combined_manifest_keeps_needs() {
        let mut generator = Generator::new(config_for(&["europe"]), MemoryStore::new());
        generator.run().unwrap();

        let combined = parse(generator.store(), "planet-workflow.json");
        assert_eq!(combined.get_step("import").unwrap().needs, vec!["download"]);
        assert_eq!(combined.get_step("index").unwrap().needs, vec!["import"]);
    }

    #[test]
    fn test_step_manifests_match_combined() {
        let mut generator = Generator::new(GeneratorConfig::default(), MemoryStore::new());
        generator.run().unwrap();
        let store = generator.into_store();

        let combined = parse(&store, "planet-workflow.json");
        for step in &combined.steps {
            let single = parse(&store, &format!("planet-{}.json", step.id));
            assert_eq!(single.len(), 1);
            assert!(single.steps[0].needs.is_empty());
            assert_eq!(single.steps[0], step.detached());
        }
    }

    #[test]
    fn test_single_region_documents() {
        let mut generator = Generator::new(config_for(&["liechtenstein"]), MemoryStore::new());
        generator.run().unwrap();

        let download = parse(generator.store(), "planet-download.json");
        assert_eq!(
            download.steps[0].tasks,
            vec![Task::DownloadUrl {
                url: "https://download.geofabrik.de/liechtenstein-latest.osm.pbf".to_string(),
                path: "liechtenstein-latest.osm.pbf".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_region_list() {
        let mut generator = Generator::new(config_for(&[]), MemoryStore::new());
        let report = generator.run().unwrap();
        assert_eq!(report.tasks, 1);

        let combined = parse(generator.store(), "planet-workflow.json");
        assert!(combined.steps[0].tasks.is_empty());
        assert!(combined.steps[1].tasks.is_empty());
        assert_eq!(combined.steps[2].tasks.len(), 1);
    }

    #[test]
    fn test_runs_are_byte_identical() {
        let mut first = Generator::new(GeneratorConfig::default(), MemoryStore::new());
        let mut second = Generator::new(GeneratorConfig::default(), MemoryStore::new());
        let report = first.run().unwrap();
        assert_eq!(second.run().unwrap(), report);

        let (a, b) = (first.into_store(), second.into_store());
        assert_eq!(a.len(), b.len());
        for name in &report.documents {
            assert!(a.get(name).is_some(), "{}", name);
            assert_eq!(a.get(name), b.get(name), "{}", name);
        }
    }

    #[test]
    fn test_rerun_overwrites_files() {
        let temp_dir = tempdir().unwrap();
        let config = GeneratorConfig {
            output_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        let path = temp_dir.path().join("planet-workflow.json");

        let store = FsStore::create(&config.output_dir).unwrap();
        Generator::new(config.clone(), store).run().unwrap();
        let first = std::fs::read(&path).unwrap();

        let store = FsStore::create(&config.output_dir).unwrap();
        Generator::new(config, store).run().unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 4);
    }

    #[test]
    fn test_invalid_template_writes_nothing() {
        let workflow = Workflow::from_steps(vec![
            Step::new("download").with_task(PROTOTYPE.steps[0].tasks[0].clone()),
            Step::new("import").depends_on("index"),
            Step::new("index"),
        ]);
        let template = Template::new(workflow, vec!["europe".to_string()]);

        let mut generator =
            Generator::with_template(GeneratorConfig::default(), template, MemoryStore::new());
        let result = generator.run();

        assert!(matches!(result, Err(Error::InvalidTemplate(_))));
        assert!(generator.store().is_empty());
    }

    #[test]
    fn test_write_failure_aborts_remaining_writes() {
        let store = FlakyStore {
            inner: MemoryStore::new(),
            remaining: 2,
        };
        let mut generator = Generator::new(GeneratorConfig::default(), store);

        let result = generator.run();
        assert!(matches!(result, Err(Error::Write { ref name, .. }) if name == "planet-import.json"));
        assert_eq!(generator.store().inner.len(), 2);
    }
}
