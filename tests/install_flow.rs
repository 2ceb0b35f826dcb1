//! Build-and-install and removal flows against a scripted process runner.
//!
//! These tests change the process working directory, so they serialize on a
//! file-local mutex.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

use popstar::error::PopstarError;
use popstar::install::{
    CommandSpec, Elevation, OperationConfig, OperationOutcome, Orchestrator, ProcessRunner,
    RunOutput, WorkdirGuard, fetch,
};

static CWD_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn cwd_lock() -> std::sync::MutexGuard<'static, ()> {
    CWD_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// How the scripted `git clone` behaves.
#[derive(Clone, Copy)]
enum CloneBehavior {
    /// Create the clone with a PKGBUILD.
    WithBuildFile,
    /// Create the clone without a PKGBUILD.
    Empty,
    /// Fail like git does for an unknown repository.
    Fail,
}

/// Runner that scripts `git`, records every command and the cwd it ran in.
struct ScriptedRunner {
    clone: CloneBehavior,
    /// Directory deleted while `makepkg` runs.
    vanish_on_build: Option<PathBuf>,
    /// Make `makepkg` exit non-zero.
    fail_build: bool,
    log: Mutex<Vec<(String, PathBuf)>>,
}

impl ScriptedRunner {
    fn new(clone: CloneBehavior) -> Self {
        Self {
            clone,
            vanish_on_build: None,
            fail_build: false,
            log: Mutex::new(Vec::new()),
        }
    }

    fn commands(&self) -> Vec<String> {
        self.log
            .lock()
            .expect("log lock")
            .iter()
            .map(|(cmd, _)| cmd.clone())
            .collect()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<RunOutput, PopstarError> {
        let cwd = std::env::current_dir().expect("cwd");
        self.log
            .lock()
            .expect("log lock")
            .push((cmd.display(), cwd));
        if cmd.program == "git" {
            let dest = Path::new(&cmd.args[2]);
            match self.clone {
                CloneBehavior::WithBuildFile => {
                    std::fs::create_dir_all(dest).expect("mkdir");
                    std::fs::write(dest.join("PKGBUILD"), "pkgname=demo\n").expect("write");
                }
                CloneBehavior::Empty => std::fs::create_dir_all(dest).expect("mkdir"),
                CloneBehavior::Fail => {
                    return Err(PopstarError::ProcessExit {
                        command: cmd.display(),
                        code: Some(128),
                    });
                }
            }
        }
        if cmd.program == "makepkg" {
            if let Some(dir) = &self.vanish_on_build {
                std::fs::remove_dir_all(dir).expect("remove original dir");
            }
            if self.fail_build {
                return Err(PopstarError::ProcessExit {
                    command: cmd.display(),
                    code: Some(4),
                });
            }
        }
        Ok(RunOutput::default())
    }
}

fn config(scratch: PathBuf) -> OperationConfig {
    OperationConfig {
        aur_base_url: "https://aur.archlinux.org".into(),
        scratch_dir: scratch,
        build_noconfirm: true,
        remove_noconfirm: true,
        keep_clone: false,
        dry_run: false,
        elevation: Elevation::wrapped_by("doas"),
    }
}

#[test]
/// What: The build runs inside the clone and the cwd is restored afterwards.
///
/// - Input: Clone with PKGBUILD
/// - Output: `Installed`; makepkg ran in `<scratch>/demo`; cwd unchanged; scratch removed
fn install_runs_build_in_clone_and_restores_cwd() {
    let _lock = cwd_lock();
    let root = tempfile::tempdir().expect("tempdir");
    let scratch = root.path().join("popstarTemp");
    let before = std::env::current_dir().expect("cwd");
    let orch = Orchestrator::new(
        ScriptedRunner::new(CloneBehavior::WithBuildFile),
        config(scratch.clone()),
    );

    let outcome = orch.build_and_install("demo");

    assert!(matches!(outcome, OperationOutcome::Installed { ref package } if package == "demo"));
    assert!(outcome.is_success());
    assert_eq!(std::env::current_dir().expect("cwd"), before);
    assert!(!scratch.exists());
    let log = orch.runner().log.lock().expect("log lock");
    assert_eq!(log.len(), 2);
    assert_eq!(
        log[0].0,
        format!(
            "git clone https://aur.archlinux.org/demo.git {}",
            scratch.join("demo").display()
        )
    );
    assert_eq!(log[1].0, "makepkg -si --noconfirm");
    assert!(log[1].1.ends_with("popstarTemp/demo"));
}

#[test]
/// What: A failed clone never builds and still restores the cwd.
///
/// - Input: git exits 128
/// - Output: `CloneFailed` with a `Network` cause naming the status; only the
///   clone command ran; cwd unchanged
fn failed_clone_reports_clone_failure() {
    let _lock = cwd_lock();
    let root = tempfile::tempdir().expect("tempdir");
    let before = std::env::current_dir().expect("cwd");
    let orch = Orchestrator::new(
        ScriptedRunner::new(CloneBehavior::Fail),
        config(root.path().join("popstarTemp")),
    );

    let outcome = orch.build_and_install("no-such-package");

    assert!(matches!(
        outcome,
        OperationOutcome::CloneFailed {
            error: PopstarError::Network(ref msg),
            ..
        } if msg.contains("128")
    ));
    assert_eq!(orch.runner().commands().len(), 1);
    assert_eq!(std::env::current_dir().expect("cwd"), before);
}

#[test]
/// What: A clone without a PKGBUILD is a build failure and makepkg never runs.
///
/// - Input: Empty clone
/// - Output: `BuildFailed` with `MissingBuildFile`; cwd unchanged
fn missing_build_file_is_build_failure() {
    let _lock = cwd_lock();
    let root = tempfile::tempdir().expect("tempdir");
    let before = std::env::current_dir().expect("cwd");
    let orch = Orchestrator::new(
        ScriptedRunner::new(CloneBehavior::Empty),
        config(root.path().join("popstarTemp")),
    );

    let outcome = orch.build_and_install("demo");

    assert!(matches!(
        outcome,
        OperationOutcome::BuildFailed {
            error: PopstarError::MissingBuildFile(_),
            ..
        }
    ));
    assert!(!orch.runner().commands().iter().any(|c| c.starts_with("makepkg")));
    assert_eq!(std::env::current_dir().expect("cwd"), before);
}

#[test]
/// What: Losing the original directory mid-build is reported above all else.
///
/// - Input: Original cwd deleted during `makepkg`, with and without a build failure
/// - Output: `DirectoryRestoreFailed` naming the vanished directory both times
fn vanished_original_dir_wins_over_build_result() {
    let _lock = cwd_lock();
    let _return_here = WorkdirGuard::capture();
    for fail_build in [false, true] {
        let root = tempfile::tempdir().expect("tempdir");
        let origin = root.path().join("origin");
        std::fs::create_dir_all(&origin).expect("mkdir origin");
        std::env::set_current_dir(&origin).expect("enter origin");
        let origin = std::env::current_dir().expect("cwd");

        let mut runner = ScriptedRunner::new(CloneBehavior::WithBuildFile);
        runner.vanish_on_build = Some(origin.clone());
        runner.fail_build = fail_build;
        let orch = Orchestrator::new(runner, config(root.path().join("popstarTemp")));

        let outcome = orch.build_and_install("demo");

        assert!(!outcome.is_success());
        match outcome {
            OperationOutcome::DirectoryRestoreFailed {
                package,
                error: PopstarError::Filesystem { path, .. },
            } => {
                assert_eq!(package, "demo");
                assert_eq!(path, origin);
            }
            other => panic!("expected DirectoryRestoreFailed (fail_build={fail_build}), got {other:?}"),
        }
        std::env::set_current_dir(root.path()).expect("leave deleted dir");
    }
}

#[test]
/// What: Re-running an install over leftovers starts from a clean scratch dir.
///
/// - Input: Scratch dir with a stale file; `keep_clone`
/// - Output: Stale file gone, fresh clone present
fn scratch_is_cleared_before_each_clone() {
    let _lock = cwd_lock();
    let root = tempfile::tempdir().expect("tempdir");
    let scratch = root.path().join("popstarTemp");
    std::fs::create_dir_all(&scratch).expect("mkdir");
    std::fs::write(scratch.join("stale.txt"), "old").expect("write");
    let mut cfg = config(scratch.clone());
    cfg.keep_clone = true;
    let orch = Orchestrator::new(ScriptedRunner::new(CloneBehavior::WithBuildFile), cfg);

    assert!(orch.build_and_install("demo").is_success());
    assert!(!scratch.join("stale.txt").exists());
    assert!(scratch.join("demo/PKGBUILD").is_file());
}

#[test]
/// What: Fetch rejects URLs without a repository name before touching disk.
///
/// - Input: `https://host/.git`
/// - Output: `InvalidUrl`, no command run, scratch not created
fn fetch_rejects_nameless_url() {
    let root = tempfile::tempdir().expect("tempdir");
    let scratch = root.path().join("popstarTemp");
    let runner = ScriptedRunner::new(CloneBehavior::WithBuildFile);
    let err = fetch(&runner, "https://host/.git", &scratch).expect_err("nameless url");
    assert!(matches!(err, PopstarError::InvalidUrl(_)));
    assert!(runner.commands().is_empty());
    assert!(!scratch.exists());
}

#[test]
/// What: Removal runs the elevated pacman command with the configured flags.
///
/// - Input: Remove `vim` with doas and `remove_noconfirm`
/// - Output: `Removed`; single command `doas pacman -Rns --noconfirm vim`
fn remove_runs_elevated_pacman() {
    let root = tempfile::tempdir().expect("tempdir");
    let orch = Orchestrator::new(
        ScriptedRunner::new(CloneBehavior::Fail),
        config(root.path().join("popstarTemp")),
    );
    let outcome = orch.remove("vim");
    assert!(matches!(outcome, OperationOutcome::Removed { .. }));
    assert_eq!(
        orch.runner().commands(),
        ["doas pacman -Rns --noconfirm vim"]
    );
}
