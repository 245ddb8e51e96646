//! The UCI engine subprocess driver.

use crate::{EngineOption, SearchInfo, SearchLimits, UciError};
use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// The outcome of a `go` request.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// The best move, in UCI long algebraic notation.
    pub best_move: String,
    /// The move the engine would like to ponder on.
    pub ponder: Option<String>,
    /// Every `info` line received during the search, in order.
    pub info: Vec<SearchInfo>,
}

impl SearchResult {
    /// The last search info the engine reported, usually the final depth.
    pub fn last_info(&self) -> Option<&SearchInfo> {
        self.info.last()
    }
}

/// A handle to a running UCI engine subprocess.
///
/// The driver owns the child process and both pipes; all send/receive
/// operations are synchronous. [`UciEngine::quit`] is idempotent, and
/// dropping the handle tears the process down if it is still alive.
pub struct UciEngine {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout: Option<BufReader<ChildStdout>>,
    /// The engine's name, from `id name` during the handshake.
    pub name: String,
    /// The engine's author, from `id author` during the handshake.
    pub author: String,
    /// The options the engine declared during the handshake.
    pub options: Vec<EngineOption>,
}

impl UciEngine {
    /// Spawns an engine subprocess with piped stdio. The engine is not
    /// yet initialized; call [`init`](Self::init) next.
    pub fn spawn<P: AsRef<OsStr>>(program: P) -> Result<Self, UciError> {
        Self::spawn_with_args(program, std::iter::empty::<&OsStr>())
    }

    /// Spawns an engine subprocess with command-line arguments.
    pub fn spawn_with_args<P, I, A>(program: P, args: I) -> Result<Self, UciError>
    where
        P: AsRef<OsStr>,
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take().map(BufReader::new);

        Ok(UciEngine {
            child: Some(child),
            stdin,
            stdout,
            name: String::new(),
            author: String::new(),
            options: Vec::new(),
        })
    }

    /// Sends one command line to the engine.
    pub fn send(&mut self, command: &str) -> Result<(), UciError> {
        tracing::debug!(command, "-> engine");
        let stdin = self.stdin.as_mut().ok_or(UciError::EngineTerminated)?;
        writeln!(stdin, "{}", command)?;
        stdin.flush()?;
        Ok(())
    }

    /// Reads one line from the engine, trimmed.
    pub fn read_line(&mut self) -> Result<String, UciError> {
        let stdout = self.stdout.as_mut().ok_or(UciError::EngineTerminated)?;
        let mut line = String::new();
        if stdout.read_line(&mut line)? == 0 {
            return Err(UciError::EngineTerminated);
        }
        let line = line.trim().to_string();
        tracing::debug!(line = %line, "<- engine");
        Ok(line)
    }

    /// Performs the UCI handshake: sends `uci`, records the engine's id
    /// and option declarations until `uciok`, then synchronizes with
    /// `isready`/`readyok`.
    pub fn init(&mut self) -> Result<(), UciError> {
        self.send("uci")?;
        loop {
            let line = self.read_line()?;
            if let Some(name) = line.strip_prefix("id name ") {
                self.name = name.to_string();
            } else if let Some(author) = line.strip_prefix("id author ") {
                self.author = author.to_string();
            } else if let Some(option) = EngineOption::parse(&line) {
                self.options.push(option);
            } else if line == "uciok" {
                break;
            }
        }
        self.wait_ready()
    }

    /// Sends `isready` and blocks until `readyok`.
    pub fn wait_ready(&mut self) -> Result<(), UciError> {
        self.send("isready")?;
        loop {
            if self.read_line()? == "readyok" {
                return Ok(());
            }
        }
    }

    /// Announces a new game to the engine.
    pub fn new_game(&mut self) -> Result<(), UciError> {
        self.send("ucinewgame")?;
        self.wait_ready()
    }

    /// Sets the current position: the classical start or a FEN, plus the
    /// moves played from it in UCI notation.
    pub fn set_position(&mut self, fen: Option<&str>, moves: &[String]) -> Result<(), UciError> {
        let mut command = match fen {
            Some(fen) => format!("position fen {}", fen),
            None => "position startpos".to_string(),
        };
        if !moves.is_empty() {
            command.push_str(" moves ");
            command.push_str(&moves.join(" "));
        }
        self.send(&command)
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), UciError> {
        self.send(&format!("setoption name {} value {}", name, value))
    }

    /// Starts a search and blocks until `bestmove`, collecting every
    /// `info` line on the way.
    pub fn go(&mut self, limits: &SearchLimits) -> Result<SearchResult, UciError> {
        self.send(&limits.to_string())?;

        let mut result = SearchResult::default();
        loop {
            let line = self.read_line()?;
            if let Some(rest) = line.strip_prefix("bestmove") {
                let mut tokens = rest.split_whitespace();
                result.best_move = tokens
                    .next()
                    .ok_or_else(|| UciError::InvalidResponse(line.clone()))?
                    .to_string();
                if tokens.next() == Some("ponder") {
                    result.ponder = tokens.next().map(|t| t.to_string());
                }
                return Ok(result);
            }
            if let Some(info) = SearchInfo::parse(&line) {
                result.info.push(info);
            }
        }
    }

    /// Asks the engine to stop the current search. The pending
    /// `bestmove` still arrives through the running [`go`](Self::go)
    /// loop or a subsequent read.
    pub fn stop(&mut self) -> Result<(), UciError> {
        self.send("stop")
    }

    /// Shuts the engine down: sends `quit`, closes the pipes, and waits
    /// for the process to exit. Safe to call more than once; the handle
    /// is inert afterwards.
    pub fn quit(&mut self) -> Result<(), UciError> {
        if self.child.is_none() {
            return Ok(());
        }
        let _ = self.send("quit");
        self.stdin.take();
        self.stdout.take();
        if let Some(mut child) = self.child.take() {
            let _ = child.wait();
        }
        Ok(())
    }

    /// Returns true if [`quit`](Self::quit) has already torn the engine
    /// down.
    pub fn is_shut_down(&self) -> bool {
        self.child.is_none()
    }
}

impl Drop for UciEngine {
    /// Attempts a graceful `quit`, then makes sure the process is gone.
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = self
                .stdin
                .as_mut()
                .map(|stdin| writeln!(stdin, "quit").and_then(|_| stdin.flush()));
            self.stdin.take();
            self.stdout.take();
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_nonexistent_engine_fails() {
        let result = UciEngine::spawn("/nonexistent/path/to/engine");
        assert!(matches!(result, Err(UciError::Io(_))));
    }

    #[test]
    fn quit_is_idempotent() {
        // `true` exits immediately, which is fine: quit only needs the
        // handle, not a live conversation.
        let Ok(mut engine) = UciEngine::spawn("true") else {
            return; // environment without /usr/bin/true
        };
        assert!(!engine.is_shut_down());
        engine.quit().unwrap();
        assert!(engine.is_shut_down());
        engine.quit().unwrap();
        assert!(engine.is_shut_down());
        // Communication after shutdown reports termination.
        assert!(matches!(
            engine.send("isready"),
            Err(UciError::EngineTerminated)
        ));
        assert!(matches!(
            engine.read_line(),
            Err(UciError::EngineTerminated)
        ));
    }

    #[test]
    fn search_result_last_info() {
        let mut result = SearchResult::default();
        assert!(result.last_info().is_none());
        result.info.push(SearchInfo {
            depth: Some(1),
            ..SearchInfo::default()
        });
        result.info.push(SearchInfo {
            depth: Some(2),
            ..SearchInfo::default()
        });
        assert_eq!(result.last_info().unwrap().depth, Some(2));
    }
}
