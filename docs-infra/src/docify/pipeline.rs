// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Orchestrate one documentation build.
//!
//! ```text
//! load alias tables ─► remap targets ─► run generator ─► prune output ─► restore targets
//!                       (RemapGuard)                                      (always)
//! ```
//!
//! Every remap target is held by a [`RemapGuard`] from the moment it is rewritten. The
//! guards are restored explicitly at the end, and by their `Drop` impl on any early
//! return or panic, so a failing generator never leaves the sources remapped.

use crate::{
    common::workspace_utils,
    docify::{
        alias_table::load_alias_table,
        config::DocifyConfig,
        error::{DocifyError, DocifyResult},
        file_remapper::{RemapGuard, RestoreOutcome},
        generator::{GeneratorCommand, GeneratorOutcome},
        output_pruner::{self, PruneReport},
        template_helpers::TemplateHelpers,
        types::{AliasTable, RemapDirection},
    },
};
use std::path::PathBuf;

/// What a [`run_pipeline`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub remapped_files: Vec<PathBuf>,
    pub generator: GeneratorOutcome,
    pub generated_documents: usize,
    pub prune: PruneReport,
    pub restored: Vec<(PathBuf, RestoreOutcome)>,
}

/// What a [`run_pipeline`] call would do. Produced without touching any file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePlan {
    pub remap_targets: Vec<PathBuf>,
    pub command: GeneratorCommand,
    pub prune_targets: Vec<PathBuf>,
}

/// Build the [`PipelinePlan`] for `config`.
///
/// # Errors
///
/// Returns an error if the manifest or the exclusion list cannot be read or parsed.
pub fn plan_pipeline(config: &DocifyConfig) -> DocifyResult<PipelinePlan> {
    let forward = load_alias_table(&config.remappings_file(), RemapDirection::Forward)?;
    Ok(PipelinePlan {
        remap_targets: config.remap_targets(),
        command: GeneratorCommand::from_config(config, &forward)?,
        prune_targets: output_pruner::plan_prune(config)?,
    })
}

/// Run the whole pipeline.
///
/// # Errors
///
/// Returns an error if the manifest or exclusion list cannot be read, a remap would
/// split a line, the generator cannot be started, or (with
/// [`DocifyConfig::fail_on_generator_error`]) the generator fails. Remapped files are
/// restored before any of these errors is returned.
pub fn run_pipeline(config: &DocifyConfig) -> DocifyResult<PipelineReport> {
    let manifest = config.remappings_file();
    let forward = load_alias_table(&manifest, RemapDirection::Forward)?;
    let reverse = load_alias_table(&manifest, RemapDirection::Reverse)?;

    let mut guards = Vec::new();
    for target in config.remap_targets() {
        // Guards acquired so far are restored by Drop if this fails.
        guards.push(RemapGuard::acquire(&target, &forward, &reverse)?);
    }
    let remapped_files: Vec<PathBuf> =
        guards.iter().map(|guard| guard.path().to_path_buf()).collect();

    let generated = generate_and_prune(config, &forward);

    let restored = restore_all(guards);

    let (generator, prune) = generated?;
    let restored = restored?;

    let generated_documents =
        workspace_utils::find_generated_documents(&config.output_dir(), &config.output_extension)
            .len();

    Ok(PipelineReport {
        remapped_files,
        generator,
        generated_documents,
        prune,
        restored,
    })
}

/// The part of the pipeline that runs while the sources are remapped.
fn generate_and_prune(
    config: &DocifyConfig,
    forward: &AliasTable,
) -> DocifyResult<(GeneratorOutcome, PruneReport)> {
    if config.write_helpers_module {
        write_helpers_module(config)?;
    }

    let command = GeneratorCommand::from_config(config, forward)?;
    let outcome = command
        .run()?
        .into_result(config.fail_on_generator_error)?;

    let prune = output_pruner::prune_output(config)?;
    Ok((outcome, prune))
}

fn write_helpers_module(config: &DocifyConfig) -> DocifyResult<()> {
    let helpers = TemplateHelpers::new(config.excluded_functions.clone());
    let path = config.helpers_file();
    let module = helpers
        .render_module()
        .map_err(|source| DocifyError::RenderHelpers {
            path: path.clone(),
            source,
        })?;
    std::fs::write(&path, module).map_err(|source| DocifyError::write_file(&path, source))?;

    // % is Display, ? is Debug.
    tracing::debug!(message = "Wrote template helpers module", path = ?path);
    Ok(())
}

/// Restore in reverse acquisition order. Every guard is restored even if an earlier
/// one fails; the first error is returned.
fn restore_all(guards: Vec<RemapGuard>) -> DocifyResult<Vec<(PathBuf, RestoreOutcome)>> {
    let mut restored = Vec::new();
    let mut first_error = None;

    for guard in guards.into_iter().rev() {
        let path = guard.path().to_path_buf();
        match guard.restore() {
            Ok(outcome) => restored.push((path, outcome)),
            Err(error) => {
                tracing::error!(
                    message = "Could not restore remapped file",
                    path = ?path,
                    error = %error
                );
                first_error.get_or_insert(error);
            }
        }
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(restored),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::TempDir;

    const TEST_SOL: &str = "// SPDX-License-Identifier: MIT\n\
                            pragma solidity >=0.6.2 <0.9.0;\n\
                            import \"forge-std/Vm.sol\";\n\
                            abstract contract Test {}\n";

    /// A project with a stand-in generator (`sh` running a script) that records the
    /// remap target's content while it runs and writes a few pages.
    fn fake_project(generator_script: &str) -> (TempDir, DocifyConfig) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::write(root.join("remappings.txt"), "forge-std/=lib/forge-std/src/\n").unwrap();
        std::fs::create_dir_all(root.join("lib/forge-std/src")).unwrap();
        std::fs::write(root.join("lib/forge-std/src/Test.sol"), TEST_SOL).unwrap();
        std::fs::create_dir_all(root.join("docs")).unwrap();
        std::fs::write(root.join("docs/.docignore"), "test\nMock.sol\n").unwrap();
        std::fs::write(root.join("fake-docgen.sh"), generator_script).unwrap();

        let config = DocifyConfig {
            project_root: root.to_path_buf(),
            node_binary: "sh".to_string(),
            generator_script: PathBuf::from("fake-docgen.sh"),
            ..DocifyConfig::default()
        };
        (dir, config)
    }

    const WRITES_PAGES: &str = "mkdir -p docs/pages/test\n\
                                cp lib/forge-std/src/Test.sol during-run.sol\n\
                                echo '# Counter' > docs/pages/Counter.md\n\
                                echo '# Mock' > docs/pages/Mock.md\n\
                                echo '# t' > docs/pages/test/Counter.t.md\n";

    fn read(root: &Path, path: &str) -> String { std::fs::read_to_string(root.join(path)).unwrap() }

    #[test]
    fn test_run_pipeline() {
        let (dir, config) = fake_project(WRITES_PAGES);
        let root = dir.path();

        let report = run_pipeline(&config).unwrap();

        // The generator saw resolved imports.
        assert!(read(root, "during-run.sol").contains("import \"lib/forge-std/src/Vm.sol\";"));
        // The source is back to its aliased form.
        assert_eq!(read(root, "lib/forge-std/src/Test.sol"), TEST_SOL);
        // Excluded pages are gone, the rest stay.
        assert!(root.join("docs/pages/Counter.md").exists());
        assert!(!root.join("docs/pages/Mock.md").exists());
        assert!(!root.join("docs/pages/test").exists());

        assert!(report.generator.is_clean());
        assert_eq!(report.generated_documents, 1);
        assert_eq!(report.prune.deleted.len(), 2);
        assert_eq!(
            report.remapped_files,
            vec![root.join("lib/forge-std/src/Test.sol")]
        );
        assert_eq!(
            report.restored,
            vec![(root.join("lib/forge-std/src/Test.sol"), RestoreOutcome::Reversed)]
        );
    }

    #[test]
    fn test_generator_failure_is_logged_by_default() {
        let (dir, config) = fake_project("echo 'Error: ParserError' >&2\nexit 1\n");

        let report = run_pipeline(&config).unwrap();

        assert_eq!(report.generator.exit_code, Some(1));
        assert_eq!(read(dir.path(), "lib/forge-std/src/Test.sol"), TEST_SOL);
    }

    #[test]
    fn test_generator_failure_restores_before_error() {
        let (dir, mut config) = fake_project("echo 'Error: ParserError' >&2\nexit 1\n");
        config.fail_on_generator_error = true;

        let error = run_pipeline(&config).unwrap_err();

        assert!(matches!(error, DocifyError::GeneratorFailed { .. }));
        assert_eq!(read(dir.path(), "lib/forge-std/src/Test.sol"), TEST_SOL);
    }

    #[test]
    fn test_missing_generator_restores_sources() {
        let (dir, mut config) = fake_project("");
        config.node_binary = "docify-no-such-program".to_string();

        let error = run_pipeline(&config).unwrap_err();

        assert!(matches!(error, DocifyError::GeneratorSpawn { .. }));
        assert_eq!(read(dir.path(), "lib/forge-std/src/Test.sol"), TEST_SOL);
    }

    #[test]
    fn test_missing_manifest_is_fatal() {
        let (dir, config) = fake_project(WRITES_PAGES);
        std::fs::remove_file(dir.path().join("remappings.txt")).unwrap();

        assert!(matches!(
            run_pipeline(&config),
            Err(DocifyError::ReadFile { .. })
        ));
        assert!(!dir.path().join("during-run.sol").exists());
    }

    #[test]
    fn test_missing_second_target_restores_first() {
        let (dir, mut config) = fake_project(WRITES_PAGES);
        config
            .remap_targets
            .push(PathBuf::from("lib/forge-std/src/Missing.sol"));

        assert!(run_pipeline(&config).is_err());
        assert_eq!(read(dir.path(), "lib/forge-std/src/Test.sol"), TEST_SOL);
    }

    #[test]
    fn test_write_helpers_module() {
        let (dir, mut config) = fake_project(WRITES_PAGES);
        config.write_helpers_module = true;
        config.excluded_functions = vec!["initialize".to_string()];

        run_pipeline(&config).unwrap();

        assert!(read(dir.path(), "docs/helpers.js")
            .contains("const EXCLUDED_FUNCTIONS = [\"initialize\"];"));
    }

    #[test]
    fn test_plan_pipeline_touches_nothing() {
        let (dir, config) = fake_project(WRITES_PAGES);

        let plan = plan_pipeline(&config).unwrap();

        assert_eq!(plan.command.program, "sh");
        assert_eq!(
            plan.prune_targets,
            vec![
                dir.path().join("docs/pages/test"),
                dir.path().join("docs/pages/Mock.md"),
            ]
        );
        assert_eq!(read(dir.path(), "lib/forge-std/src/Test.sol"), TEST_SOL);
        assert!(!dir.path().join("during-run.sol").exists());
    }
}
