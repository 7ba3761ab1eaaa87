use std::fmt::Write;
use std::io::Write as IoWrite;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::model::VehicleState;
use crate::core::simulator::Sample;

/// SimResult contains all information of a finished run that is required for post-processing.
/// `states[i]` is the vehicle state after iteration `i`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SimResult {
    pub lap_distance: f64,
    pub samples: Vec<Sample>,
    pub states: Vec<VehicleState>,
}

/// One row of the CSV export.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord {
    pub timestep: u32,
    pub lap_time: f64,
    pub tire_degradation: f64,
    pub tire_temperature: f64,
    pub average_velocity: f64,
    pub amount_of_fuel: f64,
}

impl SimResult {
    /// xs returns the iteration indices as chart x coordinates.
    pub fn xs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.timestep as f64).collect()
    }

    /// ys returns the lap times as chart y coordinates.
    pub fn ys(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.lap_time).collect()
    }

    pub fn records(&self) -> impl Iterator<Item = ResultRecord> + '_ {
        self.samples
            .iter()
            .zip(self.states.iter())
            .map(|(sample, st)| ResultRecord {
                timestep: sample.timestep,
                lap_time: sample.lap_time,
                tire_degradation: st.tire_degradation,
                tire_temperature: st.tire_temperature,
                average_velocity: st.average_velocity,
                amount_of_fuel: st.amount_of_fuel,
            })
    }

    fn format_lap_times(&self) -> Result<String, std::fmt::Error> {
        let mut content = String::new();
        writeln!(&mut content, "RESULT: Lap times (lap distance {:.1})", self.lap_distance)?;
        writeln!(
            &mut content,
            "step, laptime, tire deg, tire temp, avg vel"
        )?;
        for rec in self.records() {
            writeln!(
                &mut content,
                "{:4}, {:8.4}, {:8.5}, {:8.4}, {:8.4}",
                rec.timestep,
                rec.lap_time,
                rec.tire_degradation,
                rec.tire_temperature,
                rec.average_velocity
            )?;
        }
        Ok(content)
    }

    /// print_lap_times prints the resulting lap times to the console output.
    pub fn print_lap_times(&self) {
        match self.format_lap_times() {
            Ok(content) => print!("{}", content),
            Err(e) => eprintln!("WARNING: Could not format lap times: {}", e),
        }
    }

    /// write_lap_times_to_file writes the lap time table to a text file.
    pub fn write_lap_times_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = self.format_lap_times()?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(path)
            .context(format!("Failed to open result file {}!", path.display()))?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// write_csv writes one row per iteration.
    pub fn write_csv(&self, path: &Path) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_path(path)
            .context(format!("Failed to create CSV file {}!", path.display()))?;
        for rec in self.records() {
            wtr.serialize(rec)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// write_json dumps the complete result.
    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let fh = std::fs::File::create(path)
            .context(format!("Failed to create JSON file {}!", path.display()))?;
        serde_json::to_writer_pretty(fh, self)
            .context(format!("Failed to write JSON file {}!", path.display()))?;
        Ok(())
    }
}
