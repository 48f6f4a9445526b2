// Tests for the geographic pipeline
//
// The fixture mixes case in countries, debt flags and platform names, and
// carries rows that the cohort validator would reject (negative age, id
// with a space, non-numeric engagement score). This pipeline still sees
// them; only the short last line is dropped by the loader.

use super::*;

const FIXTURE: &str = "\
age,id,income,time_spent_hour,engagement_score,profession,platform,country,indebt,demographics
20,101,1000,5,50,Student,Instagram,United States,True,Urban
22,102,1500,8,70,student,instagram,India,false,Rural
35,103,4000,3,40,Engineer,Facebook,United States,true,Urban
41,104,5200,9,80,Teacher,Instagram,United States,TRUE,Suburban
19,105,800,7.5,90.5,student,TikTok,India,true,Rural
28,106,3000,6,55,Engineer,facebook,Brazil,true,Urban
-5,107,1000,5,50,student,Instagram,Brazil,false,Urban
30,10 8,1000,5,50,student,Instagram,Brazil,false,Urban
33,109,2500,4,abc,Engineer,Instagram,Brazil,false,Urban
27,110,2700,10,65
";

const HEADER: &str = "age,id,income,time_spent_hour,engagement_score,profession,platform,country,indebt,demographics";

fn table_of(rows: &[&str]) -> Table {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    Table::parse(&text, ',')
}

fn fixture() -> Table {
    Table::parse(FIXTURE, ',')
}

fn debtor(id: &str, income: f64) -> Debtor {
    Debtor {
        id: id.to_string(),
        income,
    }
}

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

/// Two in-debt US users; only B2 spends more than seven hours
fn two_users() -> Table {
    table_of(&[
        "20,A1,1000,5,50,student,X,US,true,urban",
        "30,B2,2000,8,70,worker,Y,US,true,rural",
    ])
}

#[test]
fn test_sort_users_by_country_two_users() {
    let table = two_users();
    assert_eq!(
        sort_users_by_country(&table, "US", 7.0),
        vec![debtor("B2", 2000.0)]
    );
}

#[test]
fn test_unique_countries_two_users() {
    let table = two_users();
    assert_eq!(unique_countries(&table, AgeBand::new(18, 25)), ["us"]);
}

#[test]
fn test_age_stats_empty_band() {
    let table = two_users();
    assert_eq!(age_stats(&table, AgeBand::new(60, 70)), AgeBandStats::default());
    assert_eq!(age_stats(&table, AgeBand::new(60, 70)).least_engaged_demographic, "");
}

#[test]
fn test_fixture_default_band() {
    let config = AnalysisConfig {
        country: "united states".to_string(),
        ..AnalysisConfig::default()
    };
    let report = analyze(&fixture(), &config).unwrap();

    assert_eq!(report.debtors, vec![debtor("104", 5200.0)]);
    assert_eq!(report.countries, ["india", "united states"]);
    assert!(approx(report.age_stats.average_time_spent, 6.8333));
    assert!(approx(report.age_stats.income_std_dev, 360.5551));
    assert_eq!(report.age_stats.least_engaged_demographic, "urban");
    assert!(approx(report.platform_correlation(), 0.6616));
}

#[test]
fn test_fixture_older_band() {
    let config = AnalysisConfig {
        country: "India".to_string(),
        age_band: AgeBand::new(26, 40),
        ..AnalysisConfig::default()
    };
    let report = analyze(&fixture(), &config).unwrap();

    assert_eq!(report.debtors, vec![debtor("105", 800.0)]);
    assert_eq!(report.countries, ["brazil", "united states"]);
    assert!(approx(report.age_stats.average_time_spent, 4.5));
    assert!(approx(report.age_stats.income_std_dev, 1250.0));
    assert_eq!(report.age_stats.least_engaged_demographic, "urban");
}

#[test]
fn test_fixture_band_without_users() {
    let config = AnalysisConfig {
        country: "Brazil".to_string(),
        age_band: AgeBand::new(60, 70),
        ..AnalysisConfig::default()
    };
    let report = analyze(&fixture(), &config).unwrap();

    assert!(report.debtors.is_empty());
    assert!(report.countries.is_empty());
    assert_eq!(report.age_stats, AgeBandStats::default());
    assert!(approx(report.platform_correlation(), 0.6616));
}

#[test]
fn test_fixture_wide_band_mean_and_demographic() {
    let stats = age_stats(&fixture(), AgeBand::new(18, 45));
    assert!(approx(stats.average_time_spent, 5.9375));
    assert!(approx(stats.income_std_dev, 1606.0155));
    assert_eq!(stats.least_engaged_demographic, "urban");
}

#[test]
fn test_popular_platform_uses_raw_names() {
    let popular = popular_platform_correlation(&fixture()).unwrap().unwrap();
    // "Instagram" and "instagram" are different platforms here
    assert_eq!(popular.platform, "Instagram");
    assert_eq!(popular.users, 5);
    assert!(approx(popular.correlation, 0.6616));
}

#[test]
fn test_debtors_sorted_by_numeric_id() {
    let table = table_of(&[
        "30,10,100,8,1,x,p,US,true,urban",
        "30,9,200,8,1,x,p,US,true,urban",
        "30,100,300,8,1,x,p,US,true,urban",
        "30,A7,400,8,1,x,p,US,true,urban",
    ]);
    let ids: Vec<_> = sort_users_by_country(&table, "us", 7.0)
        .into_iter()
        .map(|debtor| debtor.id)
        .collect();
    assert_eq!(ids, ["9", "10", "100", "A7"]);
}

#[test]
fn test_debtor_filters() {
    let table = table_of(&[
        // exactly at the threshold: not strictly greater
        "30,1,100,7,1,x,p,US,true,urban",
        // debt flag must spell true
        "30,2,100,9,1,x,p,US,yes,urban",
        // unparseable hours or income drop the row
        "30,3,100,lots,1,x,p,US,true,urban",
        "30,4,n/a,9,1,x,p,US,true,urban",
        // other country
        "30,5,100,9,1,x,p,UK,true,urban",
        "30,6,150,7.01,1,x,p,US,tRuE,urban",
    ]);
    assert_eq!(
        sort_users_by_country(&table, "US", 7.0),
        vec![debtor("6", 150.0)]
    );
}

#[test]
fn test_unique_countries_band_is_inclusive() {
    let table = table_of(&[
        "18,1,100,1,1,x,p,Chile,true,urban",
        "25,2,100,1,1,x,p,Peru,true,urban",
        "17,3,100,1,1,x,p,Cuba,true,urban",
        "26,4,100,1,1,x,p,Fiji,true,urban",
        " 20 ,5,100,1,1,x,p, PERU ,true,urban",
        "twenty,6,100,1,1,x,p,Oman,true,urban",
    ]);
    assert_eq!(unique_countries(&table, AgeBand::new(18, 25)), ["chile", "peru"]);
}

#[test]
fn test_least_engaged_tie_goes_to_smallest_label() {
    let table = table_of(&[
        "20,1,100,4,1,x,p,US,true,Suburban",
        "20,2,100,4,1,x,p,US,true,Rural",
        "20,3,100,9,1,x,p,US,true,Urban",
    ]);
    assert_eq!(
        age_stats(&table, AgeBand::new(18, 25)).least_engaged_demographic,
        "rural"
    );
}

#[test]
fn test_popular_platform_tie_goes_to_smallest_name() {
    let table = table_of(&[
        "20,1,100,1,1,x,Zeta,US,true,urban",
        "30,2,200,1,1,x,Alpha,US,true,urban",
    ]);
    let popular = popular_platform_correlation(&table).unwrap().unwrap();
    assert_eq!(popular.platform, "Alpha");
    assert_eq!(popular.users, 1);
    assert_eq!(popular.correlation, 0.0);
}

#[test]
fn test_popular_platform_counts_rows_without_numbers() {
    let table = table_of(&[
        "20,1,,1,1,x,Alpha,US,true,urban",
        "30,2,,1,1,x,Alpha,US,true,urban",
        "old,3,500,1,1,x,Alpha,US,true,urban",
        "20,4,100,1,1,x,Beta,US,true,urban",
        "30,5,200,1,1,x,Beta,US,true,urban",
    ]);
    let popular = popular_platform_correlation(&table).unwrap().unwrap();
    assert_eq!(popular.platform, "Alpha");
    assert_eq!(popular.users, 3);
    // no row of Alpha has both numbers
    assert_eq!(popular.correlation, 0.0);
}

#[test]
fn test_popular_platform_correlates_parseable_rows_only() {
    let table = table_of(&[
        "20,1,100,1,1,x,Alpha,US,true,urban",
        "30,2,200,1,1,x,Alpha,US,true,urban",
        "40,3,n/a,1,1,x,Alpha,US,true,urban",
        "20,4,100,1,1,x,Beta,US,true,urban",
    ]);
    let popular = popular_platform_correlation(&table).unwrap().unwrap();
    assert_eq!(popular.platform, "Alpha");
    assert_eq!(popular.users, 3);
    assert!(approx(popular.correlation, 1.0));
}

#[test]
fn test_popular_platform_none_for_empty_table() {
    assert_eq!(popular_platform_correlation(&Table::default()).unwrap(), None);
}

#[test]
fn test_empty_table_yields_default_report() {
    let report = analyze(&Table::default(), &AnalysisConfig::default()).unwrap();
    assert_eq!(report, GeoReport::default());
    assert_eq!(report.platform_correlation(), 0.0);
}

#[test]
fn test_missing_column_is_schema_error() {
    let table = Table::parse("age,id,income\n20,1,100\n", ',');
    let err = analyze(&table, &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::Schema(_)));
}

#[test]
fn test_in_band_accepts_signed_and_padded_ages() {
    let band = AgeBand::new(0, 10);
    assert!(in_band(" 5 ", band));
    assert!(in_band("+5", band));
    assert!(!in_band("-5", band));
    assert!(!in_band("5.0", band));
}
