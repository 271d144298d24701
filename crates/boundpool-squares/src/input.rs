use boundpool::WorkerPool;
use std::io::{self, BufRead};

/// One whitespace-separated token typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Number(i64),
    /// `0` ends the session.
    Exit,
    Invalid(String),
}

impl Input {
    pub fn parse(token: &str) -> Self {
        match token.parse::<i64>() {
            Ok(0) => Self::Exit,
            Ok(n) => Self::Number(n),
            Err(_) => Self::Invalid(token.to_owned()),
        }
    }
}

/// Splits `reader` into tokens, line by line.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD, so such a token
/// comes out as [`Input::Invalid`] and the lines after it are still read.
pub fn inputs<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<Input>> {
    reader.split(b'\n').flat_map(|line| match line {
        Ok(line) => String::from_utf8_lossy(&line)
            .split_whitespace()
            .map(|token| Ok(Input::parse(token)))
            .collect::<Vec<_>>(),
        Err(e) => vec![Err(e)],
    })
}

/// Submits every number read from `reader` until `0` or end of input.
///
/// Blocks whenever the pool's queue is full. Returns how many numbers were
/// submitted.
pub fn feed<R: BufRead>(reader: R, pool: &WorkerPool<i64>) -> anyhow::Result<usize> {
    let mut submitted = 0;

    for input in inputs(reader) {
        match input? {
            Input::Number(n) => {
                pool.submit(n)?;
                submitted += 1;
                tracing::trace!("Submitted {n} ({} queued)", pool.queued()?);
            }
            Input::Exit => break,
            Input::Invalid(token) => {
                tracing::warn!("Ignoring {token:?}: not an integer");
            }
        }
    }

    Ok(submitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    #[test]
    fn tokens_are_classified() {
        let parsed: Vec<_> = inputs(Cursor::new("3 -4\nabc\n  0 9"))
            .map(Result::unwrap)
            .collect();

        assert_eq!(
            parsed,
            vec![
                Input::Number(3),
                Input::Number(-4),
                Input::Invalid("abc".to_owned()),
                Input::Exit,
                Input::Number(9),
            ]
        );
    }

    #[test]
    fn feed_stops_at_zero_and_skips_garbage() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let pool = WorkerPool::with_threads(2, move |n: i64, _: usize| {
            sink.lock().unwrap().push(n);
        })
        .unwrap();

        let submitted = feed(Cursor::new("1 2 x 3\n0\n4 5\n"), &pool).unwrap();
        pool.shutdown().unwrap();

        assert_eq!(submitted, 3);
        let mut seen = seen.lock().unwrap().clone();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn non_utf8_bytes_become_an_invalid_token() {
        let parsed: Vec<_> = inputs(Cursor::new(&b"5 \xff\xfe\r\n6"[..]))
            .map(Result::unwrap)
            .collect();

        assert_eq!(
            parsed,
            vec![
                Input::Number(5),
                Input::Invalid("\u{FFFD}\u{FFFD}".to_owned()),
                Input::Number(6),
            ]
        );
    }

    #[test]
    fn feed_skips_lines_that_are_not_utf8() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let pool = WorkerPool::with_threads(1, move |n: i64, _: usize| {
            sink.lock().unwrap().push(n);
        })
        .unwrap();

        let submitted = feed(Cursor::new(&b"1\n\xff\n2\n"[..]), &pool).unwrap();
        pool.shutdown().unwrap();

        assert_eq!(submitted, 2);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn feed_stops_at_end_of_input() {
        let pool = WorkerPool::with_threads(1, |_: i64, _: usize| {}).unwrap();
        assert_eq!(feed(Cursor::new("7\n8"), &pool).unwrap(), 2);
    }

    #[test]
    fn feed_after_shutdown_reports_the_pool_error() {
        let pool = WorkerPool::with_threads(1, |_: i64, _: usize| {}).unwrap();
        pool.shutdown().unwrap();

        let err = feed(Cursor::new("7"), &pool).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<boundpool::Error>(),
            Some(boundpool::Error::ShutdownInProgress)
        ));
    }
}
