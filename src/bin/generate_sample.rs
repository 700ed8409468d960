use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Days, NaiveDate};
use parquet::arrow::ArrowWriter;

use catalog_dashboard::data::model::REQUIRED_COLUMNS;

const TITLES: usize = 600;

const DIRECTORS: [&str; 12] = [
    "Rajiv Chilaka",
    "Raúl Campos, Jan Suter",
    "Marcus Raboy",
    "Suhas Kadav",
    "Jay Karas",
    "Cathy Garcia-Molina",
    "Martin Scorsese",
    "Youssef Chahine",
    "Jay Chapman",
    "Steven Spielberg",
    "Not Specified",
    "Don Michael Paul",
];

const ACTORS: [&str; 14] = [
    "Anupam Kher",
    "Shah Rukh Khan",
    "Julie Tejwani",
    "Naseeruddin Shah",
    "Takahiro Sakurai",
    "Rupa Bhimani",
    "Om Puri",
    "Akshay Kumar",
    "Yuki Kaji",
    "Paresh Rawal",
    "Boman Irani",
    "Vincent Tong",
    "Andrea Libman",
    "Kate Higgins",
];

const COUNTRIES: [&str; 9] = [
    "United States",
    "India",
    "United Kingdom",
    "Japan",
    "South Korea",
    "Canada",
    "Spain",
    "France",
    "Mexico",
];

const GENRES: [&str; 10] = [
    "International Movies",
    "Dramas",
    "Comedies",
    "International TV Shows",
    "Documentaries",
    "Action & Adventure",
    "TV Dramas",
    "Independent Movies",
    "Children & Family Movies",
    "Romantic Movies",
];

const RATINGS: [&str; 7] = ["TV-MA", "TV-14", "TV-PG", "R", "PG-13", "TV-Y7", "PG"];

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

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn chance(&mut self, percent: usize) -> bool {
        self.below(100) < percent
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// `1..=max` distinct picks joined with ", ".
    fn pick_many(&mut self, items: &[&str], max: usize) -> String {
        let count = 1 + self.below(max);
        let mut chosen: Vec<&str> = Vec::with_capacity(count);
        while chosen.len() < count.min(items.len()) {
            let item = self.pick(items);
            if !chosen.contains(&item) {
                chosen.push(item);
            }
        }
        chosen.join(", ")
    }
}

/// One generated row, cells in `REQUIRED_COLUMNS` order.
type Row = [Option<String>; 10];

fn generate_row(i: usize, rng: &mut SimpleRng) -> Row {
    let is_movie = rng.chance(70);
    let release_year = 1995 + rng.below(27) as i64;

    let director = (!rng.chance(15)).then(|| rng.pick(&DIRECTORS).to_string());
    let cast = (!rng.chance(10)).then(|| rng.pick_many(&ACTORS, 4));
    let country = (!rng.chance(8)).then(|| rng.pick_many(&COUNTRIES, 2));

    let base = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default();
    let date_added = (!rng.chance(3)).then(|| {
        let date = base + Days::new(rng.below(7 * 365) as u64);
        date.format("%B %-d, %Y").to_string()
    });

    let duration = if is_movie {
        format!("{} min", 70 + rng.below(90))
    } else {
        let seasons = 1 + rng.below(6);
        if seasons == 1 {
            "1 Season".to_string()
        } else {
            format!("{seasons} Seasons")
        }
    };

    [
        Some(format!("Sample Title {i:04}")),
        Some(if is_movie { "Movie" } else { "TV Show" }.to_string()),
        director,
        cast,
        country,
        date_added,
        Some(release_year.to_string()),
        Some(rng.pick(&RATINGS).to_string()),
        Some(duration),
        Some(rng.pick_many(&GENRES, 3)),
    ]
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(REQUIRED_COLUMNS)?;
    for row in rows {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let year_idx = REQUIRED_COLUMNS
        .iter()
        .position(|c| *c == "release_year")
        .context("release_year column")?;

    let mut fields = Vec::with_capacity(REQUIRED_COLUMNS.len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(REQUIRED_COLUMNS.len());
    for (idx, name) in REQUIRED_COLUMNS.iter().enumerate() {
        if idx == year_idx {
            let years: Vec<Option<i64>> = rows
                .iter()
                .map(|r| r[idx].as_deref().and_then(|y| y.parse().ok()))
                .collect();
            fields.push(Field::new(*name, DataType::Int64, true));
            columns.push(Arc::new(Int64Array::from(years)));
        } else {
            let values: Vec<Option<&str>> = rows.iter().map(|r| r[idx].as_deref()).collect();
            fields.push(Field::new(*name, DataType::Utf8, true));
            columns.push(Arc::new(StringArray::from(values)));
        }
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows: Vec<Row> = (0..TITLES).map(|i| generate_row(i, &mut rng)).collect();

    write_csv("sample_catalog.csv", &rows)?;
    write_parquet("sample_catalog.parquet", &rows)?;

    println!("Wrote {TITLES} titles to sample_catalog.csv and sample_catalog.parquet");
    Ok(())
}
