//! Shared fixtures: yearly CSV tables written to a temporary directory.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use author_metrics::config::Config;
use author_metrics::dataset::FieldMapping;
use author_metrics::DatasetStore;
use tempfile::TempDir;

/// One row of a fixture table.
#[derive(Debug, Clone)]
pub struct Row {
    pub authfull: &'static str,
    pub cntry: &'static str,
    pub inst_name: &'static str,
    pub total_pubs: i64,
    pub cites: i64,
    pub cites_ns: i64,
    pub h_index_ns: f64,
    pub firstyr: i64,
    pub lastyr: i64,
    pub self_rate: f64,
    pub rank_ns: i64,
    pub citing_ns: i64,
    pub field: &'static str,
    pub subfield: &'static str,
}

impl Row {
    pub fn new(authfull: &'static str, cntry: &'static str, inst_name: &'static str) -> Self {
        Self {
            authfull,
            cntry,
            inst_name,
            total_pubs: 10,
            cites: 100,
            cites_ns: 90,
            h_index_ns: 5.0,
            firstyr: 2010,
            lastyr: 2020,
            self_rate: 0.05,
            rank_ns: 1000,
            citing_ns: 60,
            field: "Information & Communication Technologies",
            subfield: "Artificial Intelligence & Image Processing",
        }
    }
}

/// Render a full table for `year` with every known column.
pub fn table(year: u16, rows: &[Row]) -> String {
    let mapping = FieldMapping::for_year(year).expect("fixture year has a mapping");
    let mut out = format!(
        "authfull,cntry,inst_name,{},{},{},{},{},{},{},firstyr,lastyr,rank,rank (ns),self%,c (ns),npciting (ns),sm-field,sm-subfield-1\n",
        mapping.total_pubs,
        mapping.cites_ns,
        mapping.cites,
        mapping.h_index_ns,
        mapping.npsfl,
        mapping.cpsf,
        mapping.nps,
    );
    for row in rows {
        writeln!(
            out,
            "\"{}\",{},\"{}\",{},{},{},{},1,2,3,{},{},{},{},{},3.5,{},\"{}\",\"{}\"",
            row.authfull,
            row.cntry,
            row.inst_name,
            row.total_pubs,
            row.cites_ns,
            row.cites,
            row.h_index_ns,
            row.firstyr,
            row.lastyr,
            row.rank_ns + 1,
            row.rank_ns,
            row.self_rate,
            row.citing_ns,
            row.field,
            row.subfield,
        )
        .expect("write to string");
    }
    out
}

/// Write one table per year into `dir` using the test file template.
pub fn write_tables(dir: &Path, tables: &[(u16, Vec<Row>)]) {
    let config = Config::for_testing(dir);
    for (year, rows) in tables {
        std::fs::write(config.dataset_path(*year), table(*year, rows)).expect("write fixture");
    }
}

/// Standard four-year fixture.
///
/// - Jane Doe (chn) appears in 2021-2023, with 50 papers over 2000-2023 in 2023
/// - two John Smiths in aus share a name in every year, at different institutions
/// - Rick Roe (usa) appears only in 2020
pub fn standard_tables() -> Vec<(u16, Vec<Row>)> {
    let jane = |year: u16| Row {
        total_pubs: 40 + i64::from(year - 2021) * 5,
        cites: 1000 + i64::from(year - 2021) * 100,
        firstyr: 2000,
        lastyr: i64::from(year),
        ..Row::new("Doe, Jane", "chn", "Tsinghua University")
    };
    let smiths = || {
        vec![
            Row::new("Smith, John", "aus", "University of Sydney"),
            Row::new("Smith, John", "aus", "Monash University"),
        ]
    };

    let mut jane_2023 = jane(2023);
    jane_2023.total_pubs = 50;
    jane_2023.self_rate = 0.125;

    vec![
        (2020, [vec![Row::new("Roe, Rick", "usa", "MIT")], smiths()].concat()),
        (2021, [vec![jane(2021)], smiths()].concat()),
        (2022, [vec![jane(2022)], smiths()].concat()),
        (
            2023,
            [
                vec![jane_2023, Row::new("Doe, Jack", "chn", "Peking University")],
                smiths(),
            ]
            .concat(),
        ),
    ]
}

/// Load the standard fixture from a fresh temporary directory.
pub fn standard_store() -> (TempDir, Arc<DatasetStore>) {
    let dir = TempDir::new().expect("tempdir");
    write_tables(dir.path(), &standard_tables());
    let store = DatasetStore::load(&Config::for_testing(dir.path())).expect("fixture loads");
    (dir, Arc::new(store))
}

/// Ann Lee (aus) is unique in 2020-2022 and gains a namesake at another
/// institution in 2023.
pub fn late_namesake_tables() -> Vec<(u16, Vec<Row>)> {
    let ann = || Row::new("Lee, Ann", "aus", "University of Melbourne");
    let mut tables: Vec<(u16, Vec<Row>)> = (2020..=2022).map(|year| (year, vec![ann()])).collect();
    tables.push((2023, vec![ann(), Row::new("Lee, Ann", "aus", "Monash University")]));
    tables
}
