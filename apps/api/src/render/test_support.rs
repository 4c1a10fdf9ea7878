//! Fake compiler executables for process-level tests.
//!
//! All scripts are written once, before any test spawns a child, so no test
//! ever executes a file that another thread still holds open for writing.

use std::path::PathBuf;
use std::sync::OnceLock;

use tempfile::TempDir;

pub(crate) struct FakeCompilers {
    _dir: TempDir,
    /// Copies the input file to `resume.pdf` and leaves nested scratch files behind.
    pub succeed: PathBuf,
    /// Prints a LaTeX-style error and exits 1.
    pub fail: PathBuf,
    /// Exits 0 without producing anything.
    pub silent: PathBuf,
    /// Never finishes on its own.
    pub hang: PathBuf,
}

const SUCCEED: &str = r#"#!/bin/sh
[ "$1" = "-interaction=nonstopmode" ] || exit 3
for arg in "$@"; do
  case "$arg" in
    -output-directory=*) out="${arg#-output-directory=}" ;;
    -*) ;;
    *) src="$arg" ;;
  esac
done
mkdir -p "$out/aux/nested"
echo "scratch" > "$out/aux/nested/resume.aux"
cp "$src" "$out/resume.pdf"
"#;

const FAIL: &str = r#"#!/bin/sh
echo "! Undefined control sequence." >&2
exit 1
"#;

const SILENT: &str = "#!/bin/sh\nexit 0\n";

const HANG: &str = "#!/bin/sh\nexec sleep 30\n";

pub(crate) fn fake_compilers() -> &'static FakeCompilers {
    static COMPILERS: OnceLock<FakeCompilers> = OnceLock::new();
    COMPILERS.get_or_init(|| {
        let dir = tempfile::tempdir().expect("create fake compiler dir");
        let write = |name: &str, body: &str| -> PathBuf {
            let path = dir.path().join(name);
            std::fs::write(&path, body).expect("write fake compiler");
            make_executable(&path);
            path
        };

        let succeed = write("succeed.sh", SUCCEED);
        let fail = write("fail.sh", FAIL);
        let silent = write("silent.sh", SILENT);
        let hang = write("hang.sh", HANG);

        FakeCompilers {
            _dir: dir,
            succeed,
            fail,
            silent,
            hang,
        }
    })
}

#[cfg(unix)]
fn make_executable(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod fake compiler");
}

#[cfg(not(unix))]
fn make_executable(_path: &std::path::Path) {}
