use super::*;
use std::cell::RefCell;
use std::path::PathBuf;

mod common {
    use super::*;

    /// Records requests instead of creating processes.
    #[derive(Default)]
    pub(super) struct RecordingSpawner {
        pub requests: RefCell<Vec<(String, Option<PathBuf>)>>,
        pub fail_with: Option<io::ErrorKind>,
    }

    impl Spawn for RecordingSpawner {
        fn spawn(&self, request: &SpawnRequest<'_>) -> io::Result<()> {
            self.requests.borrow_mut().push((
                request.command.to_string(),
                request.working_dir.map(Path::to_path_buf),
            ));
            match self.fail_with {
                Some(kind) => Err(io::Error::new(kind, "spawn refused")),
                None => Ok(()),
            }
        }
    }
}

mod with_test_double {
    use super::common::RecordingSpawner;
    use super::*;

    #[test]
    fn test_empty_command_is_skipped() {
        let launcher = Launcher::with_spawner(RecordingSpawner::default());

        let result = launcher.launch(&ProgramItem::new("Nothing", ""));

        assert_eq!(result, LaunchResult::Skipped);
        assert!(launcher.spawner().requests.borrow().is_empty());
    }

    #[test]
    fn test_command_is_passed_verbatim() {
        let launcher = Launcher::with_spawner(RecordingSpawner::default());
        let item = ProgramItem::new("Pipeline", "ls -la | grep \"$HOME\" > /tmp/out");

        let result = launcher.launch(&item);

        assert!(result.is_started());
        let requests = launcher.spawner().requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, item.command);
    }

    #[test]
    fn test_empty_working_dir_inherits() {
        let launcher = Launcher::with_spawner(RecordingSpawner::default());

        launcher.launch(&ProgramItem::new("Terminal", "xterm"));

        assert_eq!(launcher.spawner().requests.borrow()[0].1, None);
    }

    #[test]
    fn test_working_dir_is_forwarded() {
        let launcher = Launcher::with_spawner(RecordingSpawner::default());

        launcher.launch(&ProgramItem::new("Terminal", "xterm").with_working_dir("/srv/work"));

        assert_eq!(
            launcher.spawner().requests.borrow()[0].1,
            Some(PathBuf::from("/srv/work"))
        );
    }

    #[test]
    fn test_spawn_error_becomes_failure() {
        let launcher = Launcher::with_spawner(RecordingSpawner {
            fail_with: Some(io::ErrorKind::PermissionDenied),
            ..Default::default()
        });

        let result = launcher.launch(&ProgramItem::new("Secret", "/root/secret"));

        let failure = result.failure().unwrap();
        assert_eq!(failure.title, "Secret");
        assert_eq!(failure.command, "/root/secret");
        assert!(failure.error_message.contains("spawn refused"));
        assert!(failure.to_string().contains("failed to launch Secret"));
    }
}

mod with_shell {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_shell_fails() {
        let launcher = Launcher::with_spawner(ShellSpawner::with_shell(
            "/nonexistent/progman-shell",
            "-c",
        ));

        let result = launcher.launch(&ProgramItem::new("Terminal", "xterm"));

        assert!(matches!(result, LaunchResult::Failed(_)));
    }

    #[test]
    fn test_missing_working_dir_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");
        let launcher = Launcher::new();

        let result = launcher.launch(
            &ProgramItem::new("Echo", "echo hi").with_working_dir(missing.to_string_lossy()),
        );

        assert!(matches!(result, LaunchResult::Failed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_command_runs_detached() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join("marker");
        let launcher = Launcher::new();
        let item = ProgramItem::new("Touch", "touch marker")
            .with_working_dir(temp.path().to_string_lossy());

        let result = launcher.launch(&item);
        assert_eq!(result, LaunchResult::Started);

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !marker.exists() && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert!(marker.exists());
    }

    #[test]
    fn test_default_shell_matches_platform() {
        let expected = if cfg!(windows) { "cmd" } else { "sh" };
        assert_eq!(ShellSpawner::default().program(), expected);
    }
}
