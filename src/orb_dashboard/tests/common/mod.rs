#![allow(dead_code)]

use std::path::Path;

use orb_dashboard::{Dashboard, load_config_str};
use orb_data::{cache::FetchCache, selector::DatasetKey};
use tempfile::TempDir;

pub const USER: &str = "analyst";
pub const PASSWORD: &str = "s3cret";

pub const COMBINATIONS: &str = "\
instrument,orb_start_time,orb_end_time,range_end_time,filename
ES,09:30:00,09:35:00,10:25:00,es_full.csv
ES,09:30:00,09:35:00,11:00:00,es_partial.csv
NQ,09:30:00,09:40:00,10:25:00,nq_full.csv
CL,09:00:00,09:05:00,10:00:00,cl_missing_on_disk.csv
YM,09:30:00,09:35:00,10:25:00,ym_outlier.csv
RTY,09:30:00,09:35:00,10:25:00,rty_seconds.csv
";

/// Four trading days, Tuesday 2 Jan to Friday 5 Jan 2024.
pub const ES_FULL: &str = "\
date,orb_conf_direction,orb_conf_time,orb_range_direction,orb_true,box_color,range_conf_direction,range_high_time,range_low_time,orb_open_touch_time,max_ret_pct,max_ext_pct,max_ret_time,max_ext_time
2024-01-02,Long,09:35:00,Long,True,Green,Long,10:15:00,09:31:00,,0.42,1.8,09:50:00,10:15:00
2024-01-03,Short,09:40:00,Short,False,Red,,09:30:00,10:20:00,09:55:00,0.1,0.3,09:45:00,10:20:00
2024-01-04,Long,09:35:00,Long,True,Neutral,Short,09:33:00,10:01:00,10:05:00,inf,0.9,,10:01:00
2024-01-05,Long,09:40:00,Short,True,Green,Long,10:00:00,09:32:00,,0.7,1.2,09:58:00,10:00:00
";

/// No range or extreme columns, and one unreadable direction.
pub const ES_PARTIAL: &str = "\
date,orb_conf_direction,orb_conf_time,orb_true,box_color
2024-02-01,Long,09:35:00,True,Green
2024-02-02,Sideways,09:40:00,False,Red
";

pub const NQ_FULL: &str = "\
date,orb_conf_direction,orb_conf_time,orb_range_direction,orb_true,box_color,range_conf_direction,range_high_time,range_low_time,orb_open_touch_time,max_ret_pct,max_ext_pct,max_ret_time,max_ext_time
2024-01-02,Short,09:45:00,Short,False,Red,Short,09:30:00,10:12:00,09:50:00,0.8,0.2,09:40:00,10:12:00
";

/// One extension far outside the rest.
pub const YM_OUTLIER: &str = "\
date,orb_conf_direction,orb_conf_time,orb_range_direction,orb_true,box_color,range_conf_direction,range_high_time,range_low_time,orb_open_touch_time,max_ret_pct,max_ext_pct,max_ret_time,max_ext_time
2024-01-02,Long,09:35:00,Long,True,Green,Long,10:15:00,09:31:00,,0.42,0.1,09:50:00,10:15:00
2024-01-03,Short,09:40:00,Short,False,Red,Short,09:30:00,10:20:00,09:55:00,0.1,6000.0,09:45:00,10:20:00
";

/// Confirmation times recorded with seconds.
pub const RTY_SECONDS: &str = "\
date,orb_conf_direction,orb_conf_time,orb_range_direction,orb_true,box_color,range_conf_direction,range_high_time,range_low_time,orb_open_touch_time,max_ret_pct,max_ext_pct,max_ret_time,max_ext_time
2024-01-02,Long,09:35:30,Long,True,Green,Long,10:15:00,09:31:00,,0.42,1.8,09:50:00,10:15:00
2024-01-03,Short,09:35:10,Short,False,Red,Short,09:30:00,10:20:00,09:55:00,0.1,0.3,09:45:00,10:20:00
2024-01-04,Long,09:41:00,Long,True,Neutral,Long,09:33:00,10:01:00,10:05:00,0.3,0.9,09:40:00,10:01:00
";

fn write(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).expect("write fixture");
}

pub fn data_dir() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "available_files.csv", COMBINATIONS);
    write(dir.path(), "es_full.csv", ES_FULL);
    write(dir.path(), "es_partial.csv", ES_PARTIAL);
    write(dir.path(), "nq_full.csv", NQ_FULL);
    write(dir.path(), "ym_outlier.csv", YM_OUTLIER);
    write(dir.path(), "rty_seconds.csv", RTY_SECONDS);
    dir
}

pub fn config_toml(dir: &Path) -> String {
    format!(
        r#"
bucket_widths = [0.5, 0.25]
default_bucket_width = 0.5

[data]
dir = "{}"

[[users]]
username = "{USER}"
password = "{PASSWORD}"
"#,
        dir.display()
    )
}

/// A logged-out dashboard over `dir`.
pub fn dashboard<'c>(dir: &Path, cache: &'c FetchCache) -> Dashboard<'c> {
    let config = load_config_str(&config_toml(dir)).expect("config");
    Dashboard::from_config(config, cache).expect("dashboard")
}

/// A dashboard with the test user logged in.
pub fn logged_in<'c>(dir: &Path, cache: &'c FetchCache) -> Dashboard<'c> {
    let mut dashboard = dashboard(dir, cache);
    dashboard.login(USER, PASSWORD).expect("login");
    dashboard
}

pub fn es_full() -> DatasetKey {
    DatasetKey::new("ES", "09:30", "09:35", "10:25")
}

pub fn es_partial() -> DatasetKey {
    DatasetKey::new("ES", "09:30", "09:35", "11:00")
}
