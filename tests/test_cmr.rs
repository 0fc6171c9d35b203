#![allow(unused)]

/// unit tests for UMM-JSON granule parsing and search precondition checks
/// run with "cargo test --test test_cmr -- --nocapture"

use sentinel_scenes::SceneSelectConfig;
use sentinel_scenes::cmr::{parse_granule, parse_netrc_credentials, GranuleItem};
use sentinel_scenes::errors::SentinelScenesError;

const GRANULE_FIXTURE: &str = r#"{
    "meta": {
        "concept-id": "G2021001-ASF",
        "native-id": "S1A_EW_GRDM_1SDH_20210121T041238_20210121T041338_036231_043FDA_F583-GRD_MD"
    },
    "umm": {
        "TemporalExtent": {
            "RangeDateTime": {
                "BeginningDateTime": "2021-01-21T04:12:38+00:00",
                "EndingDateTime": "2021-01-21T04:13:38+00:00"
            }
        },
        "DataGranule": {
            "ArchiveAndDistributionInformation": [
                { "Name": "S1A_EW_GRDM_1SDH.zip", "Size": 214.16, "SizeUnit": "MB" }
            ]
        },
        "SpatialExtent": {
            "HorizontalSpatialDomain": {
                "Geometry": {
                    "GPolygons": [
                        { "Boundary": { "Points": [
                            { "Longitude": -67.31, "Latitude": 70.35 },
                            { "Longitude": -57.95, "Latitude": 71.34 },
                            { "Longitude": -59.53, "Latitude": 73.93 },
                            { "Longitude": -69.87, "Latitude": 72.88 },
                            { "Longitude": -67.31, "Latitude": 70.35 }
                        ] } }
                    ]
                }
            }
        },
        "AdditionalAttributes": [
            { "Name": "FLIGHT_LINE", "Values": ["NA"] },
            { "Name": "THUMBNAIL_URL", "Values": ["https://datapool.asf.alaska.edu/THUMBNAIL/SA/S1A_thumb.jpg"] }
        ],
        "RelatedUrls": [
            { "Type": "GET DATA", "URL": "https://datapool.asf.alaska.edu/GRD_MD/SA/S1A.zip" },
            { "Type": "GET RELATED VISUALIZATION", "URL": "https://datapool.asf.alaska.edu/BROWSE/SA/S1A.jpg" }
        ]
    }
}"#;

fn fixture () -> GranuleItem {
    serde_json::from_str( GRANULE_FIXTURE).unwrap()
}

#[test]
fn test_parse_granule () {
    let scene = parse_granule( &fixture()).unwrap();
    println!("parsed scene: {scene}");

    assert_eq!( scene.native_id, "S1A_EW_GRDM_1SDH_20210121T041238_20210121T041338_036231_043FDA_F583-GRD_MD");
    assert_eq!( scene.acquisition_date.to_rfc3339(), "2021-01-21T04:13:38+00:00"); // end, not begin
    assert_eq!( scene.month(), 1);
    assert_eq!( scene.size_mb, 214.16);
    assert_eq!( scene.footprint.exterior().0.len(), 5);
    assert_eq!( scene.thumbnail_url, "https://datapool.asf.alaska.edu/THUMBNAIL/SA/S1A_thumb.jpg");
    assert_eq!( scene.browse_url, "https://datapool.asf.alaska.edu/BROWSE/SA/S1A.jpg");
}

#[test]
fn test_missing_field_is_named () {
    let mut item = fixture();
    item.umm["TemporalExtent"]["RangeDateTime"].as_object_mut().unwrap().remove("EndingDateTime");

    match parse_granule( &item) {
        Err(SentinelScenesError::SearchError(msg)) => {
            println!("got expected error: {msg}");
            assert!( msg.contains("EndingDateTime"));
            assert!( msg.contains("S1A_EW_GRDM"));
        }
        other => panic!("expected SearchError, got {other:?}")
    }
}

#[test]
fn test_missing_thumbnail () {
    let mut item = fixture();
    item.umm.as_object_mut().unwrap().remove("AdditionalAttributes");
    assert!( parse_granule( &item).is_err());

    let mut item = fixture();
    item.umm["RelatedUrls"] = serde_json::json!([]);
    assert!( parse_granule( &item).is_err());
}

#[test]
fn test_netrc_parsing () {
    let text = "machine urs.earthdata.nasa.gov login jdoe password hunter2\n";
    let credentials = parse_netrc_credentials( text).unwrap();
    assert_eq!( credentials.username, "jdoe");
    assert_eq!( credentials.password, "hunter2");

    // multi line netrc entries are also valid
    let text = "machine urs.earthdata.nasa.gov\n  login jdoe\n  password hunter2\n";
    let credentials = parse_netrc_credentials( text).unwrap();
    assert_eq!( credentials.username, "jdoe");

    assert!( parse_netrc_credentials( "machine example.org login a password b").is_none());
}

#[test]
fn test_config_validation () {
    assert!( SceneSelectConfig::default().validate().is_ok());

    let mut config = SceneSelectConfig::default();
    config.region.pop(); // ring no longer closed
    assert!( config.validate().is_err());

    let mut config = SceneSelectConfig::default();
    config.region.truncate(2);
    assert!( config.validate().is_err());

    let mut config = SceneSelectConfig::default();
    config.start_date = "2022-01-01".to_string(); // after end_date
    assert!( config.validate().is_err());

    let mut config = SceneSelectConfig::default();
    config.end_date = "not-a-date".to_string();
    assert!( config.validate().is_err());

    let mut config = SceneSelectConfig::default();
    config.n_samples = 0;
    assert!( config.validate().is_err());

    let mut config = SceneSelectConfig::default();
    config.page_size = 5000;
    assert!( config.validate().is_err());
}
