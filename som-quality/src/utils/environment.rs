#[cfg(test)]
#[path = "../../tests/unit/utils/environment_test.rs"]
mod environment_test;

use crate::utils::{DefaultRandom, Random, ThreadPool, Timer};
use std::sync::Arc;

/// A logger type which is called with various information regarding the work done by measures.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Returns amount of CPUs.
#[cfg(not(target_arch = "wasm32"))]
pub fn get_cpus() -> usize {
    num_cpus::get()
}

/// Returns amount of CPUs.
#[cfg(target_arch = "wasm32")]
pub fn get_cpus() -> usize {
    1
}

/// Specifies how parallel loops are scheduled.
#[derive(Clone, Default)]
pub struct Parallelism {
    thread_pool: Option<Arc<ThreadPool>>,
}

impl Parallelism {
    /// Creates a parallelism settings with dedicated thread pool of given size, the size is limited
    /// by amount of available CPUs.
    pub fn new_with_threads(num_threads: usize) -> Self {
        Self { thread_pool: Some(Arc::new(ThreadPool::new(num_threads.clamp(1, get_cpus().max(1))))) }
    }

    /// Executes operation on the dedicated thread pool, if it is configured, or on global one.
    pub fn execute<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.thread_pool {
            Some(thread_pool) => thread_pool.execute(op),
            None => op(),
        }
    }
}

/// Keeps track of environment specific information which influences measure evaluation.
#[derive(Clone)]
pub struct Environment {
    /// A wrapper on random generator. Used only by measures with randomized tie breaking.
    pub random: Arc<dyn Random>,

    /// Keeps data about parallelism settings.
    pub parallelism: Parallelism,

    /// An information logger used to report progress of long computations.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates an instance of `Environment`.
    pub fn new(random: Arc<dyn Random>, parallelism: Parallelism, logger: InfoLogger) -> Self {
        Self { random, parallelism, logger }
    }

    /// Creates an environment which produces reproducible results and does not log anything.
    pub fn new_repeatable() -> Self {
        Self::new(Arc::new(DefaultRandom::new_repeatable()), Parallelism::default(), Arc::new(|_: &str| {}))
    }

    /// Runs given computation on configured parallelism and logs its duration.
    pub fn measure<R, F>(&self, name: &str, action: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        (self.logger)(&format!("{name}: started"));

        let timer = Timer::start();
        let result = self.parallelism.execute(action);

        (self.logger)(&format!("{name}: finished in {}ms", timer.elapsed_millis()));

        result
    }
}

impl Default for Environment {
    /// Creates an environment with unseeded random which does not log anything.
    fn default() -> Self {
        Self::new(Arc::new(DefaultRandom::default()), Parallelism::default(), Arc::new(|_: &str| {}))
    }
}
