//! Unit tests for types module

use trendwatch::types::*;

#[test]
fn test_bar_deserializes_without_volume() {
    let bar: Bar =
        serde_json::from_str(r#"{"time":1000,"open":1.0,"high":2.0,"low":0.5,"close":1.5}"#)
            .unwrap();
    assert_eq!(bar.volume, 0.0);
    assert_eq!(bar.hl2(), 1.25);
}

#[test]
fn test_bar_series_validation() {
    let bars = vec![
        Bar::new(0, 10.0, 11.0, 9.0, 10.0, 1.0),
        Bar::new(0, 10.0, 11.0, 9.0, 10.5, 1.0),
        Bar::new(60_000, 10.5, 10.5, 10.5, 10.5, 0.0),
    ];
    assert!(validate_bars(&bars).is_ok());

    let backwards = vec![
        Bar::new(60_000, 10.0, 11.0, 9.0, 10.0, 1.0),
        Bar::new(0, 10.0, 11.0, 9.0, 10.0, 1.0),
    ];
    assert!(validate_bars(&backwards).is_err());
}

#[test]
fn test_trend_point_serialization() {
    let point = TrendPoint {
        time: 60_000,
        upper_band: 112.0,
        lower_band: 88.0,
        in_uptrend: true,
        trend_value: 88.0,
    };

    let json = serde_json::to_value(point).unwrap();
    assert_eq!(json["upperBand"], 112.0);
    assert_eq!(json["lowerBand"], 88.0);
    assert_eq!(json["inUptrend"], true);
    assert_eq!(json["trendValue"], 88.0);

    let parsed: TrendPoint = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, point);
}

#[test]
fn test_supertrend_params_default() {
    let params = SupertrendParams::default();
    assert_eq!(params.period, 10);
    assert_eq!(params.multiplier, 3.0);
}

#[test]
fn test_display_signal_labels_and_wire_names() {
    assert_eq!(DisplaySignal::StrongBuy.to_string(), "STRONG BUY");
    assert_eq!(DisplaySignal::StrongSell.to_string(), "STRONG SELL");
    assert_eq!(DisplaySignal::Wait.to_string(), "WAIT / SIDEWAYS");

    let parsed: DisplaySignal = serde_json::from_str("\"strong_sell\"").unwrap();
    assert_eq!(parsed, DisplaySignal::StrongSell);
    assert_eq!(serde_json::to_string(&DisplaySignal::Wait).unwrap(), "\"wait\"");
}

#[test]
fn test_snapshot_omits_missing_symbol() {
    let snapshot = SignalSnapshot {
        symbol: None,
        time: 0,
        close: 100.0,
        rsi: None,
        in_uptrend: true,
        trend_value: 90.0,
        upper_band: 110.0,
        lower_band: 90.0,
        atr: 3.3,
        signal: DisplaySignal::Wait,
        patterns: vec![ChartPattern::DoubleBottom],
        timestamp: 1,
    };

    let json = serde_json::to_value(&snapshot).unwrap();
    assert!(json.get("symbol").is_none());
    assert!(json["rsi"].is_null());
    assert_eq!(json["patterns"][0], "double_bottom");
    assert_eq!(json["signal"], "wait");
}

#[test]
fn test_paper_action_wire_format() {
    let fill = Fill::new("BTC", OrderSide::Sell, 2.0, 50.0, 0.1, 60_000);
    let action = PaperAction::Sold {
        fill,
        realized_pnl: -4.5,
    };

    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(json["action"], "sold");
    assert_eq!(json["realizedPnl"], -4.5);
    assert_eq!(json["fill"]["side"], "sell");
    assert_eq!(json["fill"]["filledAt"], 60_000);
    assert_eq!(json["fill"]["symbol"], "BTC");
}

#[test]
fn test_fill_ids_are_unique() {
    let a = Fill::new("BTC", OrderSide::Buy, 1.0, 1.0, 0.0, 0);
    let b = Fill::new("BTC", OrderSide::Buy, 1.0, 1.0, 0.0, 0);
    assert_ne!(a.id, b.id);
}
