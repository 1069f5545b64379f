// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Criterion configuration for the compile benchmarks, tunable through the
//! environment so a flamegraph run can trade accuracy for turnaround:
//! `PROFILE_FREQ`, `BENCH_SAMPLE_SIZE`, `BENCH_WARMUP_SECS`,
//! `BENCH_MEASUREMENT_SECS`.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse().ok()).unwrap_or(default)
}

pub fn criterion() -> Criterion {
    Criterion::default()
        .sample_size(env_or("BENCH_SAMPLE_SIZE", 60usize).clamp(10, 200))
        .warm_up_time(Duration::from_secs(env_or("BENCH_WARMUP_SECS", 3u64).clamp(1, 60)))
        .measurement_time(Duration::from_secs(
            env_or("BENCH_MEASUREMENT_SECS", 5u64).clamp(1, 120),
        ))
        .with_profiler(PProfProfiler::new(
            env_or("PROFILE_FREQ", 100i32).clamp(1, 1000),
            Output::Flamegraph(None),
        ))
}
