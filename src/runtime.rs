use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Interval between session countdown ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TypingEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TypingEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                // key release events would double every keystroke on some platforms
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    TypingEvent::Key(key)
                }
                Ok(CtEvent::Resize(_, _)) => TypingEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    log::warn!("terminal event reader stopped: {}", e);
                    break;
                }
            };
            if tx.send(ev).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TypingEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TypingEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that interleaves input events with ticks.
///
/// Ticks are scheduled against a deadline rather than an idle timeout, so a
/// steady stream of keystrokes does not hold back the countdown.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Instant,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Instant::now() + ticker.interval();
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    /// Schedule the next tick one full interval from now.
    /// Call when a session starts or resumes.
    pub fn restart_clock(&mut self) {
        self.next_tick = Instant::now() + self.ticker.interval();
    }

    /// Blocks until the next event arrives or the tick deadline passes
    pub fn step(&mut self) -> TypingEvent {
        let now = Instant::now();
        if now >= self.next_tick {
            return self.fire_tick(now);
        }

        match self.event_source.recv_timeout(self.next_tick - now) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.fire_tick(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(self.next_tick.saturating_duration_since(Instant::now()));
                self.fire_tick(Instant::now())
            }
        }
    }

    fn fire_tick(&mut self, now: Instant) -> TypingEvent {
        self.next_tick += self.ticker.interval();
        if self.next_tick <= now {
            // fell behind (suspended terminal, slow draw); don't burst
            self.next_tick = now + self.ticker.interval();
        }
        TypingEvent::Tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let mut runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        let ev = runner.step();
        match ev {
            TypingEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(TypingEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_secs(10));
        let mut runner = Runner::new(es, ticker);

        match runner.step() {
            TypingEvent::Resize => {}
            _ => panic!("expected Resize event"),
        }
    }

    #[test]
    fn keystrokes_do_not_delay_ticks() {
        let (tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(50));
        let mut runner = Runner::new(es, ticker);

        // keep the queue busy for longer than one interval
        std::thread::spawn(move || {
            for _ in 0..40 {
                let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
                if tx.send(TypingEvent::Key(key)).is_err() {
                    break;
                }
                std::thread::sleep(Duration::from_millis(5));
            }
        });

        let started = Instant::now();
        let mut ticks = 0;
        while started.elapsed() < Duration::from_millis(180) {
            if let TypingEvent::Tick = runner.step() {
                ticks += 1;
            }
        }
        assert!(ticks >= 2, "expected ticks while typing, got {ticks}");
    }

    #[test]
    fn disconnected_source_still_waits_for_deadline() {
        let (tx, rx) = mpsc::channel::<TypingEvent>();
        drop(tx);
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(30));
        let mut runner = Runner::new(es, ticker);

        let started = Instant::now();
        assert!(matches!(runner.step(), TypingEvent::Tick));
        assert!(started.elapsed() >= Duration::from_millis(25));
    }

    #[test]
    fn default_ticker_is_one_second() {
        assert_eq!(FixedTicker::default().interval(), Duration::from_secs(1));
    }
}
