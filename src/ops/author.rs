//! `author`: set the default author attached to future commits.
//!
//! Succeeds silently and does not retroactively touch already-persisted
//! commits — `author` is recorded per-commit at creation time.

use crate::error::Result;
use crate::repo::Repository;

pub fn set_author(repo: &mut Repository, name: &str) -> Result<()> {
    repo.state.author = name.to_owned();
    repo.save()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::commit::commit;
    use crate::ops::staging::add;

    #[test]
    fn set_author_changes_future_commits_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = Repository::init(dir.path()).unwrap();
        let initial_author = repo.head_commit().unwrap().author;

        set_author(&mut repo, "Ada Lovelace").unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();
        add(&mut repo, "a.txt").unwrap();
        commit(&mut repo, "add a").unwrap();

        assert_eq!(repo.head_commit().unwrap().author, "Ada Lovelace");
        assert_ne!(initial_author, "Ada Lovelace");
    }
}
