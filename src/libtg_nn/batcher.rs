// Copyright 2019 The Tengen Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use crossbeam_utils::Backoff;
use log::error;
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::session::Session;
use crate::Error;
use tg_go::{batch_to_nhwc, FeatureSet};
use tg_utils::config;
use tg_utils::pool::ThreadPool;

/// The output rows for one inference task, one entry per output head
/// (the policy plane, then the scalar value).
pub type ModelOutput = Vec<Vec<f32>>;

/// Invoked exactly once per task, on a callback worker thread.
pub type InferenceCallback = Box<dyn FnOnce(Result<ModelOutput, Error>) + Send + 'static>;

lazy_static! {
    /// Runs client callbacks, so a slow callback never stalls whoever is
    /// draining the buffer. Process-wide; it outlives every client.
    static ref CALLBACK_POOL: ThreadPool = ThreadPool::new(*config::NUM_THREADS);
}

struct InferenceTask {
    features: FeatureSet,
    callback: InferenceCallback
}

struct ClientInner {
    session: Box<dyn Session>,
    buffer: Mutex<Vec<InferenceTask>>,
    batch_size: usize,
    num_in_flight: AtomicUsize
}

/// Gathers independent inference tasks into batches, runs the session
/// once per batch, and fans each task's slice of the outputs back to its
/// callback.
///
/// A batch is dispatched as soon as the buffer holds `batch_size` tasks;
/// a dedicated alarm thread additionally forces a flush every
/// `max_queue_delay`, so a lone task is never stranded under low load.
pub struct InferenceClient {
    inner: Arc<ClientInner>,
    stop_alarm: Option<Sender<()>>,
    alarm: Option<JoinHandle<()>>
}

impl InferenceClient {
    pub fn new(session: Box<dyn Session>) -> InferenceClient {
        InferenceClient::with_options(
            session,
            *config::BATCH_SIZE,
            Duration::from_millis(*config::MAX_QUEUE_DELAY_MS)
        )
    }

    pub fn with_options(
        session: Box<dyn Session>,
        batch_size: usize,
        max_queue_delay: Duration
    ) -> InferenceClient
    {
        assert!(batch_size > 0);

        let inner = Arc::new(ClientInner {
            session,
            buffer: Mutex::new(Vec::with_capacity(batch_size)),
            batch_size,
            num_in_flight: AtomicUsize::new(0)
        });
        let (stop_alarm, wake_up) = bounded(0);
        let alarm = {
            let inner = inner.clone();

            thread::Builder::new()
                .name("inference_alarm".into())
                .spawn(move || {
                    loop {
                        match wake_up.recv_timeout(max_queue_delay) {
                            Err(RecvTimeoutError::Timeout) => inner.flush(),
                            _ => break
                        }
                    }
                })
                .expect("could not spawn alarm thread")
        };

        InferenceClient { inner, stop_alarm: Some(stop_alarm), alarm: Some(alarm) }
    }

    /// Appends a task to the buffer. If this fills the batch, the batch is
    /// drained and run on the calling thread; the callback itself always
    /// runs on a callback worker thread.
    pub fn add(&self, features: FeatureSet, callback: InferenceCallback) {
        self.inner.enqueue(Some(InferenceTask { features, callback }));
    }

    /// Drains and runs whatever is buffered. An empty buffer is a no-op.
    pub fn flush(&self) {
        self.inner.flush();
    }
}

impl Drop for InferenceClient {
    /// Shutdown order matters: stop the alarm thread, flush the stragglers,
    /// then wait for in-flight batches so no callback can observe a
    /// released session.
    fn drop(&mut self) {
        drop(self.stop_alarm.take());

        if let Some(alarm) = self.alarm.take() {
            alarm.join().expect("could not join alarm thread");
        }

        self.inner.flush();

        let backoff = Backoff::new();

        while self.inner.num_in_flight.load(Ordering::Acquire) > 0 {
            backoff.snooze();
        }
    }
}

impl ClientInner {
    fn flush(&self) {
        self.enqueue(None);
    }

    /// Appends the task (if any) to the buffer and drains the buffer when
    /// it is full, or unconditionally on a flush. The drained batch is run
    /// outside the buffer lock.
    fn enqueue(&self, task: Option<InferenceTask>) {
        let batch = {
            let mut buffer = self.buffer.lock().expect("could not acquire lock");

            match task {
                Some(task) => {
                    buffer.push(task);

                    if buffer.len() >= self.batch_size {
                        mem::take(&mut *buffer)
                    } else {
                        vec! []
                    }
                },
                None => mem::take(&mut *buffer)
            }
        };

        if !batch.is_empty() {
            self.run_model(batch);
        }
    }

    fn run_model(&self, tasks: Vec<InferenceTask>) {
        self.num_in_flight.fetch_add(1, Ordering::AcqRel);

        let feature_refs = tasks.iter().map(|t| &t.features).collect::<Vec<_>>();
        let features = batch_to_nhwc(&feature_refs);
        let batch_size = tasks.len();

        match self.session.run(&features, batch_size) {
            Ok(outputs) => {
                debug_assert!(outputs.iter().all(|head| head.len() == batch_size));

                let mut per_task: Vec<ModelOutput> =
                    (0..batch_size).map(|_| Vec::with_capacity(outputs.len())).collect();

                for head in outputs {
                    for (idx, row) in head.into_iter().enumerate() {
                        per_task[idx].push(row);
                    }
                }

                for (task, output) in tasks.into_iter().zip(per_task.into_iter()) {
                    let callback = task.callback;

                    CALLBACK_POOL.schedule(move || callback(Ok(output)));
                }
            },
            Err(reason) => {
                error!("inference failed on a batch of {}: {}", batch_size, reason);

                for task in tasks {
                    let callback = task.callback;
                    let reason = reason.clone();

                    CALLBACK_POOL.schedule(move || callback(Err(reason)));
                }
            }
        }

        self.num_in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}
