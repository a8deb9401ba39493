// Primitives for reading CSV files.

use std::collections::HashMap;
use std::fs::File;

use crate::tourney::*;

/// Reads one ballot per row: the count, then the candidates from most to least preferred.
///
/// Candidates are numbered in order of first appearance. Empty cells are ignored.
pub fn read_csv_profile(path: &str, skip_rows: usize) -> TourneyResult<Election> {
    let (records, row_offset) = get_records(path, skip_rows)?;

    let mut names: Vec<String> = Vec::new();
    let mut index_of: HashMap<String, Candidate> = HashMap::new();
    let mut ballots: Vec<Ballot> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + row_offset + 1;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_csv_profile: lineno: {:?} row: {:?}", lineno, line);

        let count_s = line.get(0).context(CsvLineTooShortSnafu { lineno })?.trim();
        let count: u64 = count_s
            .parse::<u64>()
            .context(CsvCountSnafu { lineno, value: count_s })?;

        let mut ranking: Vec<Candidate> = Vec::new();
        for cell in line.iter().skip(1).map(|s| s.trim()).filter(|s| !s.is_empty()) {
            let c = match index_of.get(cell) {
                Some(c) => *c,
                None => {
                    let c = names.len();
                    names.push(cell.to_string());
                    index_of.insert(cell.to_string(), c);
                    c
                }
            };
            ranking.push(c);
        }
        if ranking.is_empty() {
            return CsvLineTooShortSnafu { lineno }.fail();
        }
        ballots.push(Ballot::new(&ranking, count));
    }
    info!(
        "read_csv_profile: {} ballots, candidates {:?}",
        ballots.len(),
        names
    );

    let profile = Profile::new(names.len(), ballots).context(InvalidProfileSnafu {})?;
    Ok(Election {
        title: None,
        names,
        profile,
        limits: SearchLimits::DEFAULT_LIMITS,
    })
}

fn get_records(path: &str, skip_rows: usize) -> TourneyResult<(csv::StringRecordsIntoIter<File>, usize)> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();
    for _ in 0..skip_rows {
        _ = records.next();
    }
    Ok((records, skip_rows))
}
