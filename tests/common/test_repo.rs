//! Temporary project directories for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` at `relative`, creating parent directories
    pub fn add_file(&self, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write test file");
        path
    }

    /// Small layered project: a repository, a two-level cache hierarchy,
    /// a service using both, and a test class that is excluded by default
    pub fn layered_service() -> Self {
        let repo = Self::new();
        repo.add_file(
            "src/main/java/app/Repository.java",
            r#"package app;

public interface Repository {
    User find(long id);
    void save(User user);
    void purge();
}
"#,
        );
        repo.add_file(
            "src/main/java/app/Store.java",
            r#"package app;

interface Store {
    void close();
}
"#,
        );
        repo.add_file(
            "src/main/java/app/Cache.java",
            r#"package app;

public interface Cache extends Store {
    Object get(String key);
}
"#,
        );
        repo.add_file(
            "src/main/java/app/SqlRepository.java",
            r#"package app;

public class SqlRepository implements Repository {
    public User find(long id) { return new User(); }
    public void save(User user) {}
    public void purge() {}
}
"#,
        );
        repo.add_file(
            "src/main/java/app/UserService.java",
            r#"package app;

public class UserService {
    private final Repository repository;
    private Cache cache;

    public UserService(Repository repository) {
        this.repository = repository;
    }

    public void register() {
        User user = repository.find(1L);
        repository.save(user);
    }
}
"#,
        );
        repo.add_file("src/main/java/app/User.java", "package app;\n\npublic class User {}\n");
        repo.add_file(
            "src/test/java/app/RepositoryTest.java",
            r#"package app;

class RepositoryTest {
    void cleans(Repository repository) {
        repository.purge();
    }
}
"#,
        );
        repo
    }
}
