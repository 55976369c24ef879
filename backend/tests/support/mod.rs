#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use num_complex::Complex64;
use sparam_vis::{AnalysisResult, ChartSpec, Network, Renderer, Sample};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Two-port sweep with `points` samples from `start_mhz` in `step_mhz` steps.
///
/// S21 follows `s21_db(frequency_mhz)`; the other entries are a small
/// constant reflection.
pub fn two_port_sweep(
    name: &str,
    start_mhz: f64,
    step_mhz: f64,
    points: usize,
    s21_db: impl Fn(f64) -> f64,
) -> Network {
    let reflection = Complex64::new(0.1, 0.0);
    let samples = (0..points)
        .map(|i| {
            let mhz = start_mhz + i as f64 * step_mhz;
            let s21 = Complex64::from_polar(10f64.powf(s21_db(mhz) / 20.0), -0.5);
            Sample::new(
                mhz * 1e6,
                vec![vec![reflection, reflection], vec![s21, reflection]],
            )
        })
        .collect();
    Network::new(name, samples).unwrap()
}

/// Flat-gain two-port sweep, 600..=1000 MHz in 10 MHz steps.
pub fn flat_sweep(name: &str, s21_db: f64) -> Network {
    two_port_sweep(name, 600.0, 10.0, 41, move |_| s21_db)
}

/// One-port sweep, useful for out-of-range parameter selections.
pub fn one_port_sweep(name: &str) -> Network {
    let samples = (0..5)
        .map(|i| Sample::new(700e6 + i as f64 * 50e6, vec![vec![Complex64::new(0.5, 0.0)]]))
        .collect();
    Network::new(name, samples).unwrap()
}

pub type Recorded = Arc<Mutex<Vec<(PathBuf, ChartSpec)>>>;

/// Renderer that writes a placeholder file and keeps every chart it was given.
#[derive(Default, Clone)]
pub struct RecordingRenderer {
    pub charts: Recorded,
}

impl RecordingRenderer {
    pub fn recorded(&self) -> Vec<(PathBuf, ChartSpec)> {
        self.charts.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, chart: &ChartSpec, path: &Path) -> AnalysisResult<()> {
        fs::write(path, chart.title.as_bytes())?;
        self.charts
            .lock()
            .unwrap()
            .push((path.to_path_buf(), chart.clone()));
        Ok(())
    }
}
