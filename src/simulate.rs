//! Headless spins in virtual time

use anyhow::{bail, Result};

use l9_core::{Digit, ReelCount};
use l9_slot::{SlotConfig, SlotMachine};

/// Spin `spins` times in `mode` without a window
///
/// Prints each readout, optionally each stage trace as JSON, and a digit
/// histogram at the end.
pub fn run(config: SlotConfig, mode: ReelCount, spins: u32, trace: bool) -> Result<()> {
    let mut machine = SlotMachine::new(config);
    let mut histogram = [0u64; Digit::COUNT];

    for n in 1..=spins {
        if !machine.spin_with(mode) {
            bail!("spin #{} was rejected", n);
        }
        machine.run_until_idle();
        if machine.is_spinning() {
            bail!("spin #{} did not settle", n);
        }

        for digit in machine.results().iter().flatten() {
            histogram[digit.as_index()] += 1;
        }

        let readout = machine.readout().unwrap_or_default();
        log::info!("Spin {}/{}: {}", n, spins, readout);
        println!("{:>5}  {}", n, readout);

        if trace {
            println!("{}", machine.trace().to_json()?);
        }
    }

    print_histogram(&histogram);
    Ok(())
}

fn print_histogram(histogram: &[u64; Digit::COUNT]) {
    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return;
    }

    let peak = histogram.iter().copied().max().unwrap_or(1).max(1);
    println!();
    println!("Digit distribution ({} draws)", total);
    for (digit, &count) in histogram.iter().enumerate() {
        let bar = "#".repeat((count * 40 / peak) as usize);
        println!(
            "  {}  {:>6}  {:>5.1}%  {}",
            digit,
            count,
            count as f64 * 100.0 / total as f64,
            bar
        );
    }
}
