//! Completion tracking and the progress monitor.

use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam::channel::Sender;

/// How often the monitor looks at the completion counter by default.
pub const DEFAULT_POLL: Duration = Duration::from_millis(10);

/// Counts finished columns.  Workers bump it once per column; the
/// monitor only reads it.
#[derive(Debug)]
pub struct Completion {
    done: AtomicUsize,
    total: usize,
    abandoned: AtomicBool,
}

impl Completion {
    /// A counter at zero, expecting `total` columns.
    pub fn new(total: usize) -> Self {
        Completion {
            done: AtomicUsize::new(0),
            total,
            abandoned: AtomicBool::new(false),
        }
    }

    /// Record one finished column.
    pub fn finish_column(&self) {
        self.done.fetch_add(1, Ordering::SeqCst);
    }

    /// Record that a worker gave up and the count will never reach the
    /// total.
    pub fn abandon(&self) {
        self.abandoned.store(true, Ordering::SeqCst);
    }

    /// Columns finished so far.
    pub fn completed(&self) -> usize {
        self.done.load(Ordering::SeqCst)
    }

    /// Columns expected.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether a worker gave up.
    pub fn is_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }
}

/// Whole percent of `total` that `completed` represents, truncated.
pub fn percent(completed: usize, total: usize) -> usize {
    if total == 0 {
        return 100;
    }
    (100.0 / total as f64 * completed as f64) as usize
}

/// Receives progress updates from the monitor.
pub trait Progress {
    /// Called on every poll that found columns still outstanding.
    fn report(&mut self, completed: usize, total: usize);
}

/// Clears the terminal and prints the percentage on each poll.
#[derive(Debug)]
pub struct TerminalProgress<W: Write = Stdout> {
    out: W,
}

impl TerminalProgress<Stdout> {
    /// Report to standard output.
    pub fn stdout() -> Self {
        TerminalProgress::new(io::stdout())
    }
}

impl Default for TerminalProgress<Stdout> {
    fn default() -> Self {
        TerminalProgress::stdout()
    }
}

impl<W: Write> TerminalProgress<W> {
    /// Report to any writer.
    pub fn new(out: W) -> Self {
        TerminalProgress { out }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Progress for TerminalProgress<W> {
    fn report(&mut self, completed: usize, total: usize) {
        // write errors are ignored
        let _ = writeln!(
            self.out,
            "\x1b[2Jcalculated {}% of Mandelbrot set",
            percent(completed, total)
        );
        let _ = self.out.flush();
    }
}

/// Reports nothing.
#[derive(Debug, Default)]
pub struct Quiet;

impl Progress for Quiet {
    fn report(&mut self, _completed: usize, _total: usize) {}
}

/// Poll `completion` every `poll` until all columns are done, reporting
/// to `progress` while waiting.  Then close the delivery queue by
/// dropping `closer`, which must be the last sender not held by a
/// worker.  Returns the number of polls that found work outstanding.
pub fn monitor<T, P: Progress + ?Sized>(
    completion: &Completion,
    closer: Sender<T>,
    poll: Duration,
    progress: &mut P,
) -> usize {
    let total = completion.total();
    let mut polls = 0;
    loop {
        let completed = completion.completed();
        if completed >= total || completion.is_abandoned() {
            break;
        }
        progress.report(completed, total);
        polls += 1;
        thread::sleep(poll);
    }
    if completion.is_abandoned() {
        warn!(
            "render abandoned after {} of {} columns",
            completion.completed(),
            completion.total()
        );
    }
    drop(closer);
    polls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::bounded;

    #[derive(Default)]
    struct Recorder(Vec<usize>);

    impl Progress for Recorder {
        fn report(&mut self, completed: usize, total: usize) {
            self.0.push(percent(completed, total));
        }
    }

    #[test]
    fn percent_truncates() {
        assert_eq!(percent(0, 3), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 66);
        assert_eq!(percent(1279, 2560), 49);
        assert_eq!(percent(0, 0), 100);
    }

    #[test]
    fn terminal_progress_clears_and_prints_percent() {
        let mut progress = TerminalProgress::new(Vec::new());
        progress.report(1, 4);
        progress.report(2, 3);
        let printed = String::from_utf8(progress.into_inner()).unwrap();
        assert_eq!(
            printed,
            "\x1b[2Jcalculated 25% of Mandelbrot set\n\x1b[2Jcalculated 66% of Mandelbrot set\n"
        );
    }

    #[test]
    fn monitor_prints_only_while_columns_are_outstanding() {
        let (tx, _rx) = bounded::<u8>(1);
        let c = Completion::new(2);
        c.finish_column();
        c.finish_column();
        let mut progress = TerminalProgress::new(Vec::new());
        monitor(&c, tx, Duration::from_millis(1), &mut progress);
        assert!(progress.into_inner().is_empty());
    }

    #[test]
    fn completion_counts_columns() {
        let c = Completion::new(3);
        assert_eq!(c.completed(), 0);
        c.finish_column();
        c.finish_column();
        assert_eq!(c.completed(), 2);
        assert_eq!(c.total(), 3);
        assert!(!c.is_abandoned());
    }

    #[test]
    fn monitor_exits_immediately_on_empty_total() {
        let (tx, rx) = bounded::<u8>(1);
        let c = Completion::new(0);
        let mut r = Recorder::default();
        assert_eq!(monitor(&c, tx, Duration::from_secs(60), &mut r), 0);
        assert!(r.0.is_empty());
        assert!(rx.recv().is_err());
    }

    #[test]
    fn monitor_waits_for_every_column() {
        let (tx, rx) = bounded::<u8>(1);
        let c = Completion::new(4);
        let mut r = Recorder::default();
        crossbeam::scope(|s| {
            s.spawn(|_| {
                for _ in 0..4 {
                    thread::sleep(Duration::from_millis(5));
                    c.finish_column();
                }
            });
            let polls = monitor(&c, tx, Duration::from_millis(1), &mut r);
            assert!(polls > 0);
        })
        .unwrap();
        assert_eq!(c.completed(), 4);
        assert!(r.0.iter().all(|p| *p < 100));
        assert!(r.0.windows(2).all(|w| w[0] <= w[1]));
        assert!(rx.recv().is_err());
    }

    #[test]
    fn monitor_stops_when_abandoned() {
        let (tx, rx) = bounded::<u8>(1);
        let c = Completion::new(10);
        c.abandon();
        assert_eq!(monitor(&c, tx, Duration::from_secs(60), &mut Quiet), 0);
        assert!(rx.recv().is_err());
    }
}
