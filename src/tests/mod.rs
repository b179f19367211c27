mod common;

#[cfg(test)]
mod test_team_analysis;
