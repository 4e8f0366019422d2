use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

const STREETS: [&str; 12] = [
    "BROADWAY",
    "ATLANTIC AVENUE",
    "QUEENS BOULEVARD",
    "CANAL STREET",
    "FLATBUSH AVENUE",
    "GRAND CONCOURSE",
    "DELANCEY STREET",
    "NORTHERN BOULEVARD",
    "EASTERN PARKWAY",
    "OCEAN PARKWAY",
    "HYLAN BOULEVARD",
    "WEBSTER AVENUE",
];

const BOROUGHS: [&str; 5] = ["MANHATTAN", "BROOKLYN", "QUEENS", "BRONX", "STATEN ISLAND"];

/// Injury count for one road-user class: usually zero, occasionally 1–3.
fn injury_count(rng: &mut SimpleRng) -> u64 {
    if rng.chance(0.85) {
        0
    } else {
        1 + rng.below(3)
    }
}

fn main() -> Result<()> {
    let rows: usize = match std::env::args().nth(1) {
        Some(arg) => arg.parse().context("row count must be a positive integer")?,
        None => 5_000,
    };

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path("data.csv").context("creating data.csv")?;

    writer.write_record([
        "CRASH DATE",
        "CRASH TIME",
        "BOROUGH",
        "LATITUDE",
        "LONGITUDE",
        "ON STREET NAME",
        "NUMBER OF PERSONS INJURED",
        "NUMBER OF PEDESTRIANS INJURED",
        "NUMBER OF CYCLIST INJURED",
        "NUMBER OF MOTORIST INJURED",
    ])?;

    for _ in 0..rows {
        let date = format!(
            "{:02}/{:02}/2019",
            1 + rng.below(12),
            1 + rng.below(28)
        );
        // source files write the hour without a leading zero
        let time = format!("{}:{:02}", rng.below(24), rng.below(60));
        let borough = BOROUGHS[rng.below(BOROUGHS.len() as u64) as usize];

        // a few rows get missing or zero-sentinel coordinates, like the
        // real export, so the cleaning step has something to drop
        let (latitude, longitude) = if rng.chance(0.03) {
            (String::new(), String::new())
        } else if rng.chance(0.02) {
            ("0.0".to_string(), "0.0".to_string())
        } else {
            (
                format!("{:.6}", 40.55 + rng.next_f64() * 0.35),
                format!("{:.6}", -74.25 + rng.next_f64() * 0.55),
            )
        };

        let street = if rng.chance(0.05) {
            ""
        } else {
            STREETS[rng.below(STREETS.len() as u64) as usize]
        };

        let pedestrians = injury_count(&mut rng);
        let cyclists = injury_count(&mut rng);
        let motorists = injury_count(&mut rng);
        let extra = if rng.chance(0.1) { 1 + rng.below(2) } else { 0 };
        let persons = pedestrians + cyclists + motorists + extra;

        writer.write_record([
            date.as_str(),
            time.as_str(),
            borough,
            latitude.as_str(),
            longitude.as_str(),
            street,
            &persons.to_string(),
            &pedestrians.to_string(),
            &cyclists.to_string(),
            &motorists.to_string(),
        ])?;
    }

    writer.flush().context("writing data.csv")?;
    println!("wrote {rows} synthetic collision records to data.csv");
    Ok(())
}
