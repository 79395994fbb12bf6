#![allow(dead_code)]

use std::path::Path;

use tempfile::TempDir;

pub const COMBINATIONS: &str = "\
instrument,orb_start_time,orb_end_time,range_end_time,filename
ES,09:30:00,09:35:00,10:25:00,es_0930_0935_1025.csv
ES,09:30:00,09:35:00,11:00:00,es_0930_0935_1100.csv
NQ,09:30:00,09:35:00,10:25:00,nq_0930_0935_1025.csv
CL,09:00:00,09:05:00,10:00:00,cl_missing_on_disk.csv
";

pub const ES_FULL: &str = "\
date,orb_conf_direction,orb_conf_time,orb_range_direction,orb_true,box_color,range_conf_direction,range_high_time,range_low_time,orb_open_touch_time,max_ret_pct,max_ext_pct,max_ret_time,max_ext_time
2024-01-02,Long,09:35:00,Long,True,Green,Long,10:15:00,09:31:00,,0.42,1.8,09:50:00,10:15:00
2024-01-03,Short,09:40:00,Short,False,Red,,09:30:00,10:20:00,09:55:00,0.1,0.3,09:45:00,10:20:00
2024-01-04,Long,09:35:00,Long,True,Neutral,Short,09:33:00,10:01:00,10:05:00,inf,0.9,,10:01:00
";

/// Missing the extension columns and carrying one bad label.
pub const ES_PARTIAL: &str = "\
date,orb_conf_direction,orb_conf_time,orb_true,box_color
2024-02-01,Long,09:35:00,True,Green
2024-02-02,Sideways,09:40:00,False,Red
";

pub const NQ_FULL: &str = "\
date,orb_conf_direction,orb_conf_time,orb_range_direction,orb_true,box_color,range_conf_direction,range_high_time,range_low_time,orb_open_touch_time,max_ret_pct,max_ext_pct,max_ret_time,max_ext_time
2024-01-02,Short,09:36:00,Short,False,Red,Short,09:30:00,10:12:00,09:50:00,0.8,0.2,09:40:00,10:12:00
";

pub fn write(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).expect("write fixture");
}

/// A data directory laid out like the remote repository. One combination
/// (`CL`) points at a file that does not exist.
pub fn data_dir() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "available_files.csv", COMBINATIONS);
    write(dir.path(), "es_0930_0935_1025.csv", ES_FULL);
    write(dir.path(), "es_0930_0935_1100.csv", ES_PARTIAL);
    write(dir.path(), "nq_0930_0935_1025.csv", NQ_FULL);
    dir
}
