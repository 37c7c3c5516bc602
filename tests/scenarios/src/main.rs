fn main() {
    println!("Run `cargo test -p scenarios` to execute the end-to-end shell scenarios.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use fileshell_shell::{Dispatcher, ErrorKind, Outcome, Session};
    use tempfile::TempDir;

    /// A dispatcher rooted in a fresh temporary directory.
    struct Fixture {
        dir: TempDir,
        shell: Dispatcher<Vec<u8>>,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let shell = Dispatcher::new(Session::new(dir.path(), "scenario"), Vec::new())
                .with_chunk_size(3);
            Self { dir, shell }
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.dir.path().join(rel)
        }

        fn write(&self, rel: &str, content: &str) {
            fs::write(self.path(rel), content).unwrap();
        }

        fn read(&self, rel: &str) -> String {
            fs::read_to_string(self.path(rel)).unwrap()
        }

        async fn ok(&mut self, line: &str) {
            if let Err(e) = self.shell.execute(line).await {
                panic!("`{line}` failed: {e}");
            }
        }

        async fn err(&mut self, line: &str) -> ErrorKind {
            match self.shell.execute(line).await {
                Ok(_) => panic!("`{line}` unexpectedly succeeded"),
                Err(e) => e.kind(),
            }
        }

        fn take_output(&mut self) -> String {
            let out = std::mem::take(self.shell.output_mut());
            String::from_utf8_lossy(&out).into_owned()
        }

        /// Snapshot of every entry under the fixture root.
        fn tree(&self) -> Vec<(PathBuf, Vec<u8>)> {
            fn walk(dir: &Path, out: &mut Vec<(PathBuf, Vec<u8>)>) {
                let mut entries: Vec<_> = fs::read_dir(dir).unwrap().flatten().collect();
                entries.sort_by_key(|e| e.file_name());
                for entry in entries {
                    let path = entry.path();
                    if path.is_dir() {
                        out.push((path.clone(), Vec::new()));
                        walk(&path, out);
                    } else {
                        out.push((path.clone(), fs::read(&path).unwrap()));
                    }
                }
            }
            let mut out = Vec::new();
            walk(self.dir.path(), &mut out);
            out
        }
    }

    #[tokio::test]
    async fn missing_paths_are_invalid_input_without_mutation() {
        let mut fx = Fixture::new();
        fx.write("keep.txt", "keep");
        fs::create_dir(fx.path("d")).unwrap();
        let before = fx.tree();

        for line in [
            "cd ghost",
            "cat ghost.txt",
            "rm ghost.txt",
            "hash ghost.txt",
            "rn ghost.txt other.txt",
            "cp ghost.txt d",
            "mv ghost.txt d",
            "compress ghost.txt d",
            "decompress ghost.txt.gz d",
            "cp keep.txt ghostdir",
            "mv keep.txt ghostdir",
            "compress keep.txt ghostdir",
        ] {
            assert_eq!(fx.err(line).await, ErrorKind::InvalidInput, "{line}");
        }

        assert_eq!(fx.tree(), before);
        assert_eq!(fx.shell.session().current_dir(), fx.dir.path());
    }

    #[tokio::test]
    async fn add_on_existing_path_keeps_content() {
        let mut fx = Fixture::new();
        fx.ok("add fresh.txt").await;
        assert_eq!(fx.read("fresh.txt"), "");

        fx.write("fresh.txt", "precious");
        assert_eq!(fx.err("add fresh.txt").await, ErrorKind::AlreadyExists);
        assert_eq!(fx.read("fresh.txt"), "precious");
    }

    #[tokio::test]
    async fn hash_is_deterministic_and_content_sensitive() {
        let mut fx = Fixture::new();
        fx.write("data.bin", "some bytes");

        fx.ok("hash data.bin").await;
        let first = fx.take_output();
        fx.ok("hash data.bin").await;
        let second = fx.take_output();
        assert_eq!(first, second);
        assert_eq!(
            first.lines().next().unwrap(),
            fileshell_transfer::checksum_bytes(b"some bytes")
        );

        fx.write("data.bin", "some bytes!");
        fx.ok("hash data.bin").await;
        let third = fx.take_output();
        assert_ne!(first.lines().next(), third.lines().next());
    }

    #[tokio::test]
    async fn compress_decompress_round_trip() {
        let mut fx = Fixture::new();
        fs::create_dir(fx.path("d1")).unwrap();
        fs::create_dir(fx.path("d2")).unwrap();
        let content: String = (0..5_000).map(|i| format!("line {i}\n")).collect();
        fx.write("f.txt", &content);

        fx.ok("compress f.txt d1").await;
        assert!(fx.path("d1/f.txt.gz").is_file());
        fx.ok("decompress d1/f.txt.gz d2").await;

        assert_eq!(fx.read("d2/f.txt"), content);
        assert_eq!(fx.read("f.txt"), content);
    }

    #[tokio::test]
    async fn decompress_rejects_corrupt_stream() {
        let mut fx = Fixture::new();
        fs::create_dir(fx.path("out")).unwrap();
        fx.write("bad.txt.gz", "plainly not compressed data at all");

        assert_eq!(
            fx.err("decompress bad.txt.gz out").await,
            ErrorKind::OperationFailed
        );
    }

    #[tokio::test]
    async fn ls_orders_directories_then_files() {
        let mut fx = Fixture::new();
        fx.write("b.txt", "");
        fx.write("a.txt", "");
        fs::create_dir(fx.path("zdir")).unwrap();
        fs::create_dir(fx.path("adir")).unwrap();

        fx.ok("ls").await;
        let out = fx.take_output();
        let rows: Vec<Vec<&str>> = out
            .lines()
            .skip(1)
            .take(4)
            .map(|l| l.split_whitespace().collect())
            .collect();

        assert_eq!(rows[0], ["0", "adir", "directory"]);
        assert_eq!(rows[1], ["1", "zdir", "directory"]);
        assert_eq!(rows[2], ["2", "a.txt", "file"]);
        assert_eq!(rows[3], ["3", "b.txt", "file"]);
    }

    #[tokio::test]
    async fn rename_then_cat() {
        let mut fx = Fixture::new();
        fx.write("a.txt", "alpha content");

        fx.ok("rn a.txt b.txt").await;
        fx.take_output();

        fx.ok("cat b.txt").await;
        assert!(fx.take_output().starts_with("alpha content"));
        assert_eq!(fx.err("cat a.txt").await, ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn move_into_directory() {
        let mut fx = Fixture::new();
        fx.write("s.txt", "X");
        fs::create_dir(fx.path("d")).unwrap();

        fx.ok("mv s.txt d").await;
        assert_eq!(fx.read("d/s.txt"), "X");
        assert!(!fx.path("s.txt").exists());
    }

    #[tokio::test]
    async fn copy_keeps_source_and_refuses_overwrite() {
        let mut fx = Fixture::new();
        fx.write("s.txt", "X");
        fs::create_dir(fx.path("d")).unwrap();

        fx.ok("cp s.txt d").await;
        assert_eq!(fx.read("d/s.txt"), "X");
        assert_eq!(fx.read("s.txt"), "X");

        fx.write("s.txt", "Y");
        assert_eq!(fx.err("cp s.txt d").await, ErrorKind::AlreadyExists);
        assert_eq!(fx.read("d/s.txt"), "X");
    }

    #[tokio::test]
    async fn arity_checks() {
        let mut fx = Fixture::new();
        assert_eq!(fx.err("rn onlyonearg").await, ErrorKind::MissingOperand);
        assert_eq!(fx.err("rn a b c").await, ErrorKind::TooManyArguments);
        assert_eq!(fx.err("cat").await, ErrorKind::MissingOperand);
        assert_eq!(fx.err("up now").await, ErrorKind::TooManyArguments);
        assert_eq!(fx.err("teleport home").await, ErrorKind::UnknownCommand);
    }

    #[tokio::test]
    async fn quoted_names_with_spaces() {
        let mut fx = Fixture::new();
        fs::create_dir(fx.path("backup dir")).unwrap();

        fx.ok("add my notes.txt").await;
        fx.ok("cp \"my notes.txt\" \"backup dir\"").await;
        assert!(fx.path("backup dir/my notes.txt").is_file());
    }

    #[tokio::test]
    async fn navigation_round_trip() {
        let mut fx = Fixture::new();
        fx.ok("mkdir a/b").await;
        fx.ok("cd a/b").await;
        assert_eq!(fx.shell.session().current_dir(), fx.path("a/b"));

        fx.ok("up").await;
        fx.ok("cd ..").await;
        assert_eq!(fx.shell.session().current_dir(), fx.dir.path());
    }

    #[tokio::test]
    async fn session_survives_failures_until_exit() {
        let mut fx = Fixture::new();
        assert_eq!(fx.shell.handle_line("cat nope").await.unwrap(), Outcome::Continue);
        assert_eq!(fx.shell.handle_line("rn x").await.unwrap(), Outcome::Continue);
        assert_eq!(fx.shell.handle_line("ls").await.unwrap(), Outcome::Continue);
        assert_eq!(fx.shell.handle_line(".exit").await.unwrap(), Outcome::Exit);

        let out = fx.take_output();
        assert!(out.ends_with("Thank you for using File Manager, scenario, goodbye!\n"));
    }
}
