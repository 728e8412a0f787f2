//! Ordered processor sequences with per-action failure isolation.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::warn;

use bridgebot_core::Message;

use crate::error::ProcessingError;
use crate::processor::Processor;

/// What one processor did with the message — returned so callers (and
/// tests) can assert on per-processor results instead of scraping logs.
#[derive(Debug)]
pub struct ProcessorOutcome {
    pub name: String,
    pub result: Result<(), ProcessingError>,
}

impl ProcessorOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Append then re-sort by ascending priority.
///
/// The sort is stable, so processors sharing a priority keep the order
/// they were added in.
pub fn add_processors(
    sequence: &mut Vec<Arc<dyn Processor>>,
    new: impl IntoIterator<Item = Arc<dyn Processor>>,
) {
    sequence.extend(new);
    sequence.sort_by_key(|p| p.priority());
}

/// Run every processor in sequence order against `message`.
///
/// Each action is bounded by `step_timeout`. A failing or timed-out
/// action is logged with the processor's name and recorded; the rest of
/// the sequence still runs.
pub async fn run(
    sequence: &[Arc<dyn Processor>],
    message: &mut Message,
    step_timeout: Duration,
) -> Vec<ProcessorOutcome> {
    let mut outcomes = Vec::with_capacity(sequence.len());

    for processor in sequence {
        let result = match timeout(step_timeout, processor.process(message)).await {
            Ok(result) => result,
            Err(_) => Err(ProcessingError::Timeout {
                ms: step_timeout.as_millis() as u64,
            }),
        };

        if let Err(ref e) = result {
            warn!(processor = %processor.name(), error = %e, "processor failed, continuing");
        }

        outcomes.push(ProcessorOutcome {
            name: processor.name().to_string(),
            result,
        });
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridgebot_core::{Content, MessagePayload, MessageSource, Sender, TextPayload, User};
    use chrono::Utc;
    use std::sync::Mutex;

    fn message() -> Message {
        Message::new(
            "m-1",
            Utc::now(),
            Sender::User(User::new("u-1")),
            MessageSource::private(),
            MessagePayload::Text(TextPayload::new(Content::markdown("hi"))),
        )
    }

    struct Recorder {
        name: &'static str,
        priority: i32,
        log: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    }

    #[async_trait]
    impl Processor for Recorder {
        fn name(&self) -> &str {
            self.name
        }
        fn priority(&self) -> i32 {
            self.priority
        }
        async fn process(&self, _message: &mut Message) -> Result<(), ProcessingError> {
            self.log.lock().unwrap().push(self.name);
            if self.fail {
                Err(ProcessingError::Action("boom".into()))
            } else {
                Ok(())
            }
        }
    }

    fn recorder(
        name: &'static str,
        priority: i32,
        log: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Arc<dyn Processor> {
        Arc::new(Recorder {
            name,
            priority,
            log: Arc::clone(log),
            fail: false,
        })
    }

    #[tokio::test]
    async fn processors_run_in_ascending_priority_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut sequence = Vec::new();
        // Added out of order: priorities [10, 1] named h2, h1.
        add_processors(
            &mut sequence,
            [recorder("h2", 10, &log), recorder("h1", 1, &log)],
        );

        run(&sequence, &mut message(), Duration::from_secs(1)).await;
        assert_eq!(*log.lock().unwrap(), vec!["h1", "h2"]);
    }

    #[tokio::test]
    async fn equal_priorities_keep_insertion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut sequence = Vec::new();
        add_processors(
            &mut sequence,
            [
                recorder("first", 5, &log),
                recorder("second", 5, &log),
                recorder("third", 5, &log),
            ],
        );

        run(&sequence, &mut message(), Duration::from_secs(1)).await;
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn later_additions_interleave_by_priority() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut sequence = Vec::new();
        add_processors(&mut sequence, [recorder("b", 2, &log)]);
        add_processors(&mut sequence, [recorder("a", 1, &log), recorder("c", 3, &log)]);

        run(&sequence, &mut message(), Duration::from_secs(1)).await;
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn a_failing_processor_does_not_stop_the_sequence() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut sequence: Vec<Arc<dyn Processor>> = Vec::new();
        add_processors(
            &mut sequence,
            [
                Arc::new(Recorder {
                    name: "fails",
                    priority: 1,
                    log: Arc::clone(&log),
                    fail: true,
                }) as Arc<dyn Processor>,
                recorder("survives", 2, &log),
            ],
        );

        let outcomes = run(&sequence, &mut message(), Duration::from_secs(1)).await;

        assert_eq!(*log.lock().unwrap(), vec!["fails", "survives"]);
        assert!(!outcomes[0].succeeded());
        assert!(outcomes[1].succeeded());
    }

    struct Hang;

    #[async_trait]
    impl Processor for Hang {
        fn name(&self) -> &str {
            "hang"
        }
        async fn process(&self, _message: &mut Message) -> Result<(), ProcessingError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn a_hung_processor_times_out_and_the_sequence_continues() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut sequence: Vec<Arc<dyn Processor>> = vec![Arc::new(Hang)];
        add_processors(&mut sequence, [recorder("after", 10, &log)]);

        let outcomes = run(&sequence, &mut message(), Duration::from_millis(20)).await;

        assert!(matches!(
            outcomes[0].result,
            Err(ProcessingError::Timeout { ms: 20 })
        ));
        assert_eq!(*log.lock().unwrap(), vec!["after"]);
    }
}
