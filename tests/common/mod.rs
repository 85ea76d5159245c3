use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const N_SOURCE: usize = 10;
pub const MARKERS_PER_CHROMOSOME: usize = 50;
pub const N_CHROMOSOMES: usize = 2;
pub const TOTAL_MARKERS: usize = MARKERS_PER_CHROMOSOME * N_CHROMOSOMES;
const SPACING: f64 = 0.01;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

pub struct Dataset {
    pub base_dir: PathBuf,
    pub pop_a: PathBuf,
    pub pop_b: PathBuf,
}

impl Dataset {
    pub fn output_prefix(&self, name: &str) -> PathBuf {
        self.base_dir.join("output").join(name)
    }
}

fn scratch_dir(label: &str) -> io::Result<PathBuf> {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base_dir = std::env::temp_dir().join("admixsim-tests").join(format!(
        "{}-{}-{}",
        std::process::id(),
        id,
        label
    ));
    if base_dir.exists() {
        fs::remove_dir_all(&base_dir)?;
    }
    fs::create_dir_all(&base_dir)?;
    Ok(base_dir)
}

/// Two haploid panels on two chromosomes. Population A carries only `1`
/// calls and population B only `0`, so every call names its source.
pub fn create_dataset(label: &str) -> io::Result<Dataset> {
    let base_dir = scratch_dir(label)?;
    let pop_a = base_dir.join("popA");
    let pop_b = base_dir.join("popB");

    for (prefix, name, call) in [(&pop_a, "CEU", '1'), (&pop_b, "YRI", '0')] {
        write_ind(prefix.with_extension("ind"), name, N_SOURCE)?;
        write_snp(prefix.with_extension("snp"))?;
        let row: String = std::iter::repeat_n(call, N_SOURCE).collect();
        write_geno(prefix.with_extension("geno"), &vec![row; TOTAL_MARKERS])?;
    }
    Ok(Dataset {
        base_dir,
        pop_a,
        pop_b,
    })
}

/// Three markers on one chromosome, two individuals per population.
/// Individual 0 of A carries 0,1,0 and individual 1 carries 1,0,1.
pub fn create_small_dataset(label: &str) -> io::Result<Dataset> {
    let base_dir = scratch_dir(label)?;
    let pop_a = base_dir.join("popA");
    let pop_b = base_dir.join("popB");

    let snp = "rs1 1 0.0 100 A G\nrs2 1 0.01 200 C T\nrs3 1 0.02 300 G A\n";
    fs::write(pop_a.with_extension("snp"), snp)?;
    fs::write(pop_b.with_extension("snp"), snp)?;
    write_ind(pop_a.with_extension("ind"), "CEU", 2)?;
    write_ind(pop_b.with_extension("ind"), "YRI", 2)?;
    write_geno(
        pop_a.with_extension("geno"),
        &["01".to_string(), "10".to_string(), "01".to_string()],
    )?;
    write_geno(
        pop_b.with_extension("geno"),
        &["00".to_string(), "00".to_string(), "00".to_string()],
    )?;
    Ok(Dataset {
        base_dir,
        pop_a,
        pop_b,
    })
}

pub fn snp_records() -> Vec<[String; 6]> {
    let mut records = Vec::with_capacity(TOTAL_MARKERS);
    for chromosome in 1..=N_CHROMOSOMES {
        for idx in 0..MARKERS_PER_CHROMOSOME {
            records.push([
                format!("rs{}_{}", chromosome, idx + 1),
                chromosome.to_string(),
                (idx as f64 * SPACING).to_string(),
                (1000 * (idx + 1)).to_string(),
                "A".to_string(),
                "G".to_string(),
            ]);
        }
    }
    records
}

fn write_ind(path: impl AsRef<Path>, name: &str, n: usize) -> io::Result<()> {
    let mut file = File::create(path)?;
    for idx in 0..n {
        let sex = if idx % 2 == 0 { "M" } else { "F" };
        writeln!(file, "{name}{idx} {sex} {name}")?;
    }
    Ok(())
}

fn write_snp(path: impl AsRef<Path>) -> io::Result<()> {
    let mut file = File::create(path)?;
    for record in snp_records() {
        writeln!(file, "{}", record.join(" "))?;
    }
    Ok(())
}

fn write_geno(path: impl AsRef<Path>, rows: &[String]) -> io::Result<()> {
    let mut file = File::create(path)?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    Ok(())
}
