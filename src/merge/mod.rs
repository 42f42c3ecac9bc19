//! Folder merging
//!
//! For every regular file in the first input folder, the same-named file is
//! loaded from each input folder in order and overlaid onto one record,
//! which is then written to the output folder under the same name.

use crate::domain::{MergeJob, MergePlan, MergeReport, OrderedRecord, PlannedFile};
use crate::error::MergeError;
use crate::scan::{is_regular_file, list_files};
use crate::utils::display_name;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

pub mod record;

pub use record::{load_record, overlay, save_record};

/// Run `job` to completion.
///
/// Read-side failures are recorded and the offending file counts as an empty
/// record. Write failures are recorded and skipped, or stop the job when
/// `stop_on_write_error` is set. The report always comes back.
pub fn merge_folders(job: &MergeJob) -> MergeReport {
    let mut report = MergeReport::new(job.output());
    let settings = job.settings();

    if let Err(source) = fs::create_dir_all(job.output()) {
        let err = MergeError::Write { path: job.output().to_path_buf(), source };
        error!("{err}");
        report.record(&err);
        return report;
    }

    let file_names = match list_files(job.primary_input()) {
        Ok(names) => names,
        Err(err) => {
            error!("{err}");
            report.record(&err);
            return report;
        }
    };

    for name in &file_names {
        let merged = merge_file(job.inputs(), name, &mut report);
        let target = job.output().join(name);

        match save_record(&merged, &target, settings.indent) {
            Ok(()) => {
                info!("Wrote {} ({} keys)", target.display(), merged.len());
                report.files_written += 1;
            }
            Err(err) => {
                error!("{err}");
                report.record(&err);
                if settings.stop_on_write_error {
                    report.stopped_early = true;
                    break;
                }
            }
        }
    }

    report
}

fn merge_file(inputs: &[PathBuf], name: &OsStr, report: &mut MergeReport) -> OrderedRecord {
    let mut merged = OrderedRecord::new();
    for folder in inputs {
        let path = folder.join(name);
        if !is_regular_file(&path) {
            debug!("{} absent, skipping", path.display());
            continue;
        }

        match load_record(&path) {
            Ok(record) => {
                debug!("Overlaying {} ({} keys)", path.display(), record.len());
                overlay(&mut merged, record);
            }
            Err(err) => {
                error!("{err}");
                report.record(&err);
            }
        }
    }
    merged
}

/// Work out what `job` would produce without reading contents or writing.
pub fn plan_folders(job: &MergeJob) -> Result<MergePlan, MergeError> {
    let file_names = list_files(job.primary_input())?;

    let files = file_names
        .iter()
        .map(|name| PlannedFile {
            name: display_name(name),
            sources: job
                .inputs()
                .iter()
                .filter(|folder| is_regular_file(&folder.join(name)))
                .cloned()
                .collect(),
        })
        .collect();

    let primary: BTreeSet<_> = file_names.iter().collect();
    let mut ignored = BTreeSet::new();
    for folder in job.inputs().iter().skip(1) {
        match list_files(folder) {
            Ok(names) => {
                ignored.extend(
                    names.iter().filter(|n| !primary.contains(n)).map(|n| display_name(n)),
                );
            }
            Err(err) => warn!("{err}"),
        }
    }

    Ok(MergePlan { files, ignored: ignored.into_iter().collect() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IssueKind, MergeSettings};
    use similar_asserts::assert_eq;
    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        root: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = TempDir::new().expect("tmp");
            let root = tmp.path().to_path_buf();
            Self { _tmp: tmp, root }
        }

        fn folder(&self, name: &str) -> PathBuf {
            let dir = self.root.join(name);
            fs::create_dir_all(&dir).expect("mkdir");
            dir
        }

        fn write(&self, folder: &str, file: &str, content: &str) {
            fs::write(self.folder(folder).join(file), content).expect("write fixture");
        }

        fn job(&self, inputs: &[&str], output: &str) -> MergeJob {
            let inputs = inputs.iter().map(|name| self.folder(name)).collect();
            MergeJob::new(inputs, self.root.join(output)).expect("job")
        }

        fn read(&self, output: &str, file: &str) -> String {
            fs::read_to_string(self.root.join(output).join(file)).expect("read output")
        }
    }

    #[test]
    fn later_folder_overrides_values() {
        let fx = Fixture::new();
        fx.write("a", "x.json", r#"{"a":1}"#);
        fx.write("b", "x.json", r#"{"a":2,"b":3}"#);

        let report = merge_folders(&fx.job(&["a", "b"], "out"));

        assert_eq!(report.files_written, 1);
        assert!(!report.has_issues());
        assert_eq!(fx.read("out", "x.json"), "{\n    \"a\": 2,\n    \"b\": 3\n}");
    }

    #[test]
    fn overridden_keys_keep_their_first_position() {
        let fx = Fixture::new();
        fx.write("a", "x.json", r#"{"a":1,"b":2}"#);
        fx.write("b", "x.json", r#"{"b":9,"a":8}"#);

        merge_folders(&fx.job(&["a", "b"], "out"));

        assert_eq!(fx.read("out", "x.json"), "{\n    \"a\": 8,\n    \"b\": 9\n}");
    }

    #[test]
    fn key_order_is_first_seen_union_across_folders() {
        let fx = Fixture::new();
        fx.write("a", "x.json", r#"{"k1":1,"k2":2}"#);
        fx.write("b", "x.json", r#"{"k3":3,"k1":10}"#);
        fx.write("c", "x.json", r#"{"k4":4,"k2":20}"#);

        merge_folders(&fx.job(&["a", "b", "c"], "out"));

        assert_eq!(
            fx.read("out", "x.json"),
            "{\n    \"k1\": 10,\n    \"k2\": 20,\n    \"k3\": 3,\n    \"k4\": 4\n}"
        );
    }

    #[test]
    fn files_missing_from_first_folder_are_not_produced() {
        let fx = Fixture::new();
        fx.write("a", "x.json", r#"{"a":1}"#);
        fx.write("b", "y.json", r#"{"b":1}"#);

        let report = merge_folders(&fx.job(&["a", "b"], "out"));

        assert_eq!(report.files_written, 1);
        assert!(fx.root.join("out").join("x.json").is_file());
        assert!(!fx.root.join("out").join("y.json").exists());
    }

    #[test]
    fn folders_without_the_file_are_skipped() {
        let fx = Fixture::new();
        fx.write("a", "x.json", r#"{"a":1}"#);
        fx.folder("b");
        fx.write("c", "x.json", r#"{"c":3}"#);

        let report = merge_folders(&fx.job(&["a", "b", "c"], "out"));

        assert!(!report.has_issues());
        assert_eq!(fx.read("out", "x.json"), "{\n    \"a\": 1,\n    \"c\": 3\n}");
    }

    #[test]
    fn rerunning_produces_identical_bytes() {
        let fx = Fixture::new();
        fx.write("a", "x.json", r#"{"name":"Zoë","list":[1,2,{"deep":true}],"n":null}"#);
        fx.write("b", "x.json", r#"{"list":[3],"extra":"ok"}"#);
        fx.write("a", "z.json", r#"{}"#);
        let job = fx.job(&["a", "b"], "out");

        merge_folders(&job);
        let first = (fx.read("out", "x.json"), fx.read("out", "z.json"));
        merge_folders(&job);
        let second = (fx.read("out", "x.json"), fx.read("out", "z.json"));

        assert_eq!(first, second);
    }

    #[test]
    fn malformed_source_does_not_block_other_folders() {
        let fx = Fixture::new();
        fx.write("a", "x.json", "{not json");
        fx.write("b", "x.json", r#"{"a":1}"#);

        let report = merge_folders(&fx.job(&["a", "b"], "out"));

        assert_eq!(report.files_written, 1);
        assert_eq!(fx.read("out", "x.json"), "{\n    \"a\": 1\n}");
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].kind, IssueKind::MalformedJson);
        assert_eq!(report.issues[0].path, fx.root.join("a").join("x.json"));
    }

    #[test]
    fn unreadable_source_does_not_block_other_folders() {
        let fx = Fixture::new();
        fs::write(fx.folder("a").join("x.json"), [b'{', 0xff, b'}']).expect("write invalid utf-8");
        fx.write("b", "x.json", r#"{"b":2}"#);

        let report = merge_folders(&fx.job(&["a", "b"], "out"));

        assert_eq!(report.files_written, 1);
        assert_eq!(fx.read("out", "x.json"), "{\n    \"b\": 2\n}");
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].kind, IssueKind::Read);
        assert_eq!(report.issues[0].path, fx.root.join("a").join("x.json"));
    }

    #[test]
    fn non_object_source_is_reported_and_treated_as_empty() {
        let fx = Fixture::new();
        fx.write("a", "x.json", "[1, 2, 3]");

        let report = merge_folders(&fx.job(&["a"], "out"));

        assert_eq!(report.files_written, 1);
        assert_eq!(fx.read("out", "x.json"), "{}");
        assert_eq!(report.issues[0].kind, IssueKind::NotAnObject);
    }

    #[test]
    fn output_folder_is_created_and_count_matches_first_folder() {
        let fx = Fixture::new();
        fx.write("a", "one.json", r#"{"a":1}"#);
        fx.write("a", "two.json", r#"{"b":2}"#);
        fx.write("a", "three.json", r#"{"c":3}"#);
        fs::create_dir_all(fx.folder("a").join("sub")).expect("mkdir sub");

        let report = merge_folders(&fx.job(&["a"], "deep/nested/out"));

        assert_eq!(report.files_written, 3);
        assert!(fx.root.join("deep/nested/out").is_dir());
        assert!(!fx.root.join("deep/nested/out/sub").exists());
    }

    #[test]
    fn existing_output_files_are_overwritten() {
        let fx = Fixture::new();
        fx.write("a", "x.json", r#"{"fresh":true}"#);
        fx.write("out", "x.json", "stale contents");

        merge_folders(&fx.job(&["a"], "out"));

        assert_eq!(fx.read("out", "x.json"), "{\n    \"fresh\": true\n}");
    }

    #[test]
    fn indent_setting_is_honored() {
        let fx = Fixture::new();
        fx.write("a", "x.json", r#"{"a":[1]}"#);
        let job = fx
            .job(&["a"], "out")
            .with_settings(MergeSettings { indent: 2, ..MergeSettings::default() });

        merge_folders(&job);

        assert_eq!(fx.read("out", "x.json"), "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn missing_first_folder_is_reported_with_zero_files() {
        let fx = Fixture::new();
        let job = MergeJob::new(vec![fx.root.join("absent")], fx.root.join("out")).expect("job");

        let report = merge_folders(&job);

        assert_eq!(report.files_written, 0);
        assert_eq!(report.issues[0].kind, IssueKind::Read);
        assert!(fx.root.join("out").is_dir());
    }

    #[test]
    fn output_folder_that_is_a_file_is_a_write_issue() {
        let fx = Fixture::new();
        fx.write("a", "x.json", "{}");
        fs::write(fx.root.join("out"), "not a dir").expect("write blocker");
        let job = MergeJob::new(vec![fx.folder("a")], fx.root.join("out")).expect("job");

        let report = merge_folders(&job);

        assert_eq!(report.files_written, 0);
        assert_eq!(report.issues[0].kind, IssueKind::Write);
    }

    #[test]
    fn write_failures_continue_by_default_and_stop_when_asked() {
        let fx = Fixture::new();
        fx.write("a", "a.json", r#"{"a":1}"#);
        fx.write("a", "b.json", r#"{"b":1}"#);
        fx.write("a", "c.json", r#"{"c":1}"#);
        // A directory squatting on the target name makes that one write fail.
        fs::create_dir_all(fx.root.join("out").join("a.json")).expect("mkdir blocker");

        let report = merge_folders(&fx.job(&["a"], "out"));
        assert_eq!(report.files_written, 2);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].kind, IssueKind::Write);
        assert!(!report.stopped_early);

        let strict = fx
            .job(&["a"], "out")
            .with_settings(MergeSettings { stop_on_write_error: true, ..MergeSettings::default() });
        let report = merge_folders(&strict);
        assert_eq!(report.files_written, 0);
        assert!(report.stopped_early);
    }

    #[test]
    fn plan_lists_sources_and_ignored_names() {
        let fx = Fixture::new();
        fx.write("a", "x.json", "{}");
        fx.write("a", "w.json", "{}");
        fx.write("b", "x.json", "{}");
        fx.write("b", "y.json", "{}");
        let job = fx.job(&["a", "b"], "out");

        let plan = plan_folders(&job).expect("plan");

        let names: Vec<&str> = plan.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["w.json", "x.json"]);
        assert_eq!(plan.files[0].sources, vec![fx.root.join("a")]);
        assert_eq!(plan.files[1].sources, vec![fx.root.join("a"), fx.root.join("b")]);
        assert_eq!(plan.ignored, vec!["y.json".to_string()]);
        assert!(!fx.root.join("out").exists());
    }
}
