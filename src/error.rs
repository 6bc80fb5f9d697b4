//! The closed set of user-visible error strings for gitlet.
//!
//! Defines [`GitletError`], the unified error type for every core operation.
//! Variants that correspond to a user-facing condition render an exact,
//! fixed message from `Display`; the remaining variants (internal
//! I/O/serialization failures) render a descriptive message whose exact
//! wording is not otherwise constrained.

use std::fmt;
use std::path::PathBuf;

/// Unified error type for gitlet core operations.
#[derive(Debug)]
pub enum GitletError {
    /// `init` was run in a directory that already has a `.gitlet`.
    AlreadyInitialized,

    /// Any command other than `init` was run outside an initialized repo.
    NotInitialized,

    /// `add`/`rm`/checkout-file referenced a file that doesn't exist where expected.
    FileDoesNotExist,

    /// `checkout -- <file>` / `checkout <id> -- <file>` found no such file in the commit tree.
    FileNotInCommit,

    /// `rm` was called on a file that is neither staged nor tracked in a way that would be removed.
    NoReasonToRemove,

    /// `commit` was called with nothing staged.
    NothingToCommit,

    /// `commit` (or the CLI boundary) saw an empty message.
    EmptyCommitMessage,

    /// `resolve_partial` found no object (or more than one, see Design Notes) matching the prefix.
    NoCommitWithThatId,

    /// `find` scanned every commit and none matched the keyword.
    NoCommitMatchesMessage,

    /// `checkout <branch>` referenced an unknown branch.
    NoSuchBranch,

    /// `merge <branch>` / `rm-branch <branch>` referenced an unknown branch.
    ///
    /// Same underlying condition as [`Self::NoSuchBranch`] but a distinct
    /// fixed wording for these two commands.
    NoBranchWithThatName,

    /// `checkout <branch>` was called with the branch already checked out.
    AlreadyOnThatBranch,

    /// `branch <name>` was called with a name already in use.
    BranchAlreadyExists,

    /// `rm-branch` was called on the current branch.
    CannotRemoveCurrentBranch,

    /// A working-tree write would silently clobber an untracked file.
    UntrackedFileInTheWay,

    /// `merge` was called with uncommitted staged changes.
    UncommittedChanges,

    /// `merge <branch>` where `<branch>` is the current branch.
    CannotMergeWithSelf,

    /// `merge <branch>` where `<branch>`'s head is an ancestor of the current head.
    GivenBranchIsAncestor,

    /// Malformed CLI invocation: wrong arity, malformed `checkout`, etc.
    IncorrectOperands,

    /// No command name was given at all.
    NoCommandGiven,

    /// The given command name is not recognized.
    NoSuchCommand,

    /// An I/O error occurred reading or writing repository state.
    Io(std::io::Error),

    /// The repository's JSON could not be parsed, or failed a structural check.
    Corrupt {
        /// What was being loaded (e.g. `"repo"`, `"commit abc123..."`).
        what: String,
        /// Human-readable description of the problem.
        detail: String,
    },

    /// A configuration file could not be parsed.
    ConfigError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Human-readable description of the problem.
        detail: String,
    },
}

impl fmt::Display for GitletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized => write!(
                f,
                "A Gitlet version-control system already exists in the current directory."
            ),
            Self::NotInitialized => write!(f, "Not in an initialized Gitlet directory."),
            Self::FileDoesNotExist => write!(f, "File does not exist."),
            Self::FileNotInCommit => write!(f, "File does not exist in that commit."),
            Self::NoReasonToRemove => write!(f, "No reason to remove the file."),
            Self::NothingToCommit => write!(f, "No changes added to the commit."),
            Self::EmptyCommitMessage => write!(f, "Please enter a commit message."),
            Self::NoCommitWithThatId => write!(f, "No commit with that id exists."),
            Self::NoCommitMatchesMessage => write!(f, "Found no commit with that message."),
            Self::NoSuchBranch => write!(f, "No such branch exists."),
            Self::NoBranchWithThatName => write!(f, "A branch with that name does not exist."),
            Self::AlreadyOnThatBranch => write!(f, "No need to checkout the current branch."),
            Self::BranchAlreadyExists => write!(f, "A branch with that name already exists."),
            Self::CannotRemoveCurrentBranch => write!(f, "Cannot remove the current branch."),
            Self::UntrackedFileInTheWay => write!(
                f,
                "There is an untracked file in the way; delete it, or add and commit it first."
            ),
            Self::UncommittedChanges => write!(f, "You have uncommitted changes."),
            Self::CannotMergeWithSelf => write!(f, "Cannot merge a branch with itself."),
            Self::GivenBranchIsAncestor => {
                write!(f, "Given branch is an ancestor of the current branch.")
            }
            Self::IncorrectOperands => write!(f, "Incorrect operands."),
            Self::NoCommandGiven => write!(f, "Please enter a command."),
            Self::NoSuchCommand => write!(f, "No command with that name exists."),
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Corrupt { what, detail } => {
                write!(f, "corrupt {what}: {detail}")
            }
            Self::ConfigError { path, detail } => {
                write!(f, "configuration error in '{}': {detail}", path.display())
            }
        }
    }
}

impl std::error::Error for GitletError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GitletError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for GitletError {
    fn from(err: serde_json::Error) -> Self {
        Self::Corrupt {
            what: "object".to_owned(),
            detail: err.to_string(),
        }
    }
}

/// Convenience alias used throughout the core library.
pub type Result<T> = std::result::Result<T, GitletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_already_initialized() {
        assert_eq!(
            GitletError::AlreadyInitialized.to_string(),
            "A Gitlet version-control system already exists in the current directory."
        );
    }

    #[test]
    fn display_not_initialized() {
        assert_eq!(
            GitletError::NotInitialized.to_string(),
            "Not in an initialized Gitlet directory."
        );
    }

    #[test]
    fn display_untracked_file() {
        assert_eq!(
            GitletError::UntrackedFileInTheWay.to_string(),
            "There is an untracked file in the way; delete it, or add and commit it first."
        );
    }

    #[test]
    fn display_no_command_given() {
        assert_eq!(
            GitletError::NoCommandGiven.to_string(),
            "Please enter a command."
        );
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::other("disk full");
        let err: GitletError = io_err.into();
        assert!(matches!(err, GitletError::Io(_)));
    }

    #[test]
    fn error_source_io() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = GitletError::Io(inner);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn display_no_commit_matches_message() {
        assert_eq!(
            GitletError::NoCommitMatchesMessage.to_string(),
            "Found no commit with that message."
        );
    }

    #[test]
    fn display_no_branch_with_that_name() {
        assert_eq!(
            GitletError::NoBranchWithThatName.to_string(),
            "A branch with that name does not exist."
        );
    }

    #[test]
    fn error_source_non_io_is_none() {
        assert!(std::error::Error::source(&GitletError::NoSuchBranch).is_none());
    }
}
