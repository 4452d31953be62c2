use std::{
    env,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use log::debug;

pub const TERMUX_WALLPAPER: &str = "termux-wallpaper";

/// Applies a saved image as the device background. Best effort, never fails.
pub trait WallpaperSetter {
    fn apply(&self, image: &Path);
}

/// Runs `termux-wallpaper -f <image>` when it is installed.
#[derive(Debug, Clone, Default)]
pub struct TermuxWallpaper {
    /// Directories searched instead of `PATH`
    search_path: Option<OsString>,
}

impl TermuxWallpaper {
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    fn executable(&self) -> Option<PathBuf> {
        match &self.search_path {
            Some(search_path) => find_executable_in(TERMUX_WALLPAPER, search_path),
            None => find_executable(TERMUX_WALLPAPER),
        }
    }
}

impl WallpaperSetter for TermuxWallpaper {
    fn apply(&self, image: &Path) {
        let Some(exe) = self.executable() else {
            debug!("{TERMUX_WALLPAPER} not on PATH, skipping");
            return;
        };
        // exit status is ignored
        let status = Command::new(&exe)
            .arg("-f")
            .arg(image)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) => debug!("{} exited with {status}", exe.display()),
            Err(e) => debug!("couldn't run {}: {e}", exe.display()),
        }
    }
}

pub fn find_executable(name: &str) -> Option<PathBuf> {
    find_executable_in(name, &env::var_os("PATH")?)
}

pub fn find_executable_in(name: &str, search_path: &OsStr) -> Option<PathBuf> {
    env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = path.metadata() else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::{fs, os::unix::fs::PermissionsExt};

    use color_eyre::Result;
    use tempfile::TempDir;

    use super::*;

    fn write_file(dir: &Path, name: &str, mode: u32) -> Result<PathBuf> {
        write_script(dir, name, mode, "")
    }

    fn write_script(dir: &Path, name: &str, mode: u32, body: &str) -> Result<PathBuf> {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}"))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(mode))?;
        Ok(path)
    }

    #[test]
    fn finds_executable_in_later_dir() -> Result<()> {
        let first = TempDir::new()?;
        let second = TempDir::new()?;
        let expected = write_file(second.path(), TERMUX_WALLPAPER, 0o755)?;

        let search = env::join_paths([first.path(), second.path()])?;
        assert_eq!(find_executable_in(TERMUX_WALLPAPER, &search), Some(expected));
        Ok(())
    }

    #[test]
    fn skips_non_executable_files() -> Result<()> {
        let dir = TempDir::new()?;
        write_file(dir.path(), TERMUX_WALLPAPER, 0o644)?;

        let search = env::join_paths([dir.path()])?;
        assert_eq!(find_executable_in(TERMUX_WALLPAPER, &search), None);
        Ok(())
    }

    #[test]
    fn skips_directories() -> Result<()> {
        let dir = TempDir::new()?;
        fs::create_dir(dir.path().join(TERMUX_WALLPAPER))?;

        let search = env::join_paths([dir.path()])?;
        assert_eq!(find_executable_in(TERMUX_WALLPAPER, &search), None);
        Ok(())
    }

    #[test]
    fn missing_everywhere() {
        assert_eq!(
            find_executable_in("wallai-no-such-binary", OsStr::new("/nonexistent:")),
            None
        );
    }

    #[test]
    fn apply_runs_termux_wallpaper_with_file_flag() -> Result<()> {
        let bin = TempDir::new()?;
        let out = TempDir::new()?;
        let args_file = out.path().join("args");
        write_script(
            bin.path(),
            TERMUX_WALLPAPER,
            0o755,
            &format!("echo \"$@\" > '{}'\n", args_file.display()),
        )?;
        let image = out.path().join("wallai-1700000000-1.jpg");

        TermuxWallpaper::with_search_path(bin.path()).apply(&image);

        assert_eq!(
            fs::read_to_string(&args_file)?,
            format!("-f {}\n", image.display())
        );
        Ok(())
    }

    #[test]
    fn apply_ignores_failing_command() -> Result<()> {
        let bin = TempDir::new()?;
        write_script(bin.path(), TERMUX_WALLPAPER, 0o755, "echo oops >&2\nexit 3\n")?;

        TermuxWallpaper::with_search_path(bin.path()).apply(Path::new("/tmp/wallai-1.jpg"));
        Ok(())
    }

    #[test]
    fn apply_without_executable_is_a_no_op() -> Result<()> {
        let bin = TempDir::new()?;
        TermuxWallpaper::with_search_path(bin.path()).apply(Path::new("/tmp/wallai-1.jpg"));
        Ok(())
    }
}
