// ABOUTME: Static directory of selectable trip origins and destinations
// ABOUTME: Maps human-readable place names to the provider's location codes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Static location directory.
//!
//! Used only to render the origin/destination choice menus; the domain model
//! carries location codes, never display names.

/// One selectable place in the location directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Human-readable place name shown on menu buttons
    pub name: &'static str,
    /// Provider location code carried in callbacks and watches
    pub code: &'static str,
}

/// Every place selectable as a trip origin or destination
pub const DIRECTORY: &[Location] = &[
    Location { name: "تهران", code: "THR" },
    Location { name: "اهواز", code: "AWZ" },
    Location { name: "شیراز", code: "SYZ" },
    Location { name: "مشهد", code: "MHD" },
    Location { name: "بندر عباس", code: "BND" },
    Location { name: "اصفهان", code: "IFN" },
    Location { name: "تبریز", code: "TBZ" },
    Location { name: "کیش", code: "KIH" },
    Location { name: "آبادان", code: "ABD" },
    Location { name: "اراک", code: "AJK" },
    Location { name: "اردبیل", code: "ADU" },
    Location { name: "ارومیه", code: "OMH" },
    Location { name: "امیدیه", code: "AKW" },
    Location { name: "ایرانشهر", code: "IHR" },
    Location { name: "ایلام", code: "IIL" },
    Location { name: "بجنورد", code: "BJB" },
    Location { name: "بم", code: "BXR" },
    Location { name: "بندر لنگه", code: "BDH" },
    Location { name: "بوشهر", code: "BUZ" },
    Location { name: "بیرجند", code: "XBJ" },
    Location { name: "پارس آباد", code: "PFQ" },
    Location { name: "جاسک", code: "JSK" },
    Location { name: "جهرم", code: "JAR" },
    Location { name: "جیرفت", code: "JYR" },
    Location { name: "چابهار", code: "ZBR" },
    Location { name: "خارک", code: "KHK" },
    Location { name: "خرم آباد", code: "KHD" },
    Location { name: "خوی", code: "KHY" },
    Location { name: "دزفول", code: "DEF" },
    Location { name: "رامسر", code: "RZR" },
    Location { name: "رشت", code: "RAS" },
    Location { name: "رفسنجان", code: "RJN" },
    Location { name: "زابل", code: "ACZ" },
    Location { name: "زاهدان", code: "ZAH" },
    Location { name: "زنجان", code: "JWN" },
    Location { name: "ساری", code: "SRY" },
    Location { name: "سبزوار", code: "AFZ" },
    Location { name: "سمنان", code: "SNX" },
    Location { name: "سنندج", code: "SDG" },
    Location { name: "مراغه", code: "ACP" },
    Location { name: "سیرجان", code: "SYJ" },
    Location { name: "شاهرود", code: "RUD" },
    Location { name: "شهرکرد", code: "CQD" },
    Location { name: "طبس", code: "TCX" },
    Location { name: "عسلویه", code: "PGU" },
    Location { name: "قشم", code: "GSM" },
    Location { name: "کاشان", code: "KKS" },
    Location { name: "کرج", code: "PYK" },
    Location { name: "کرمان", code: "KER" },
    Location { name: "کرمانشاه", code: "KSH" },
    Location { name: "کلاله", code: "KLM" },
    Location { name: "گچساران", code: "GCH" },
    Location { name: "گرگان", code: "GBT" },
    Location { name: "لار", code: "LRR" },
    Location { name: "لامرد", code: "LFM" },
    Location { name: "ماکو", code: "MAC" },
    Location { name: "ماهشهر", code: "MRX" },
    Location { name: "نوشهر", code: "NSH" },
    Location { name: "همدان", code: "HDM" },
    Location { name: "یاسوج", code: "YES" },
    Location { name: "یزد", code: "AZD" },
];

/// Look up a directory entry by its location code
#[must_use]
pub fn by_code(code: &str) -> Option<&'static Location> {
    DIRECTORY.iter().find(|location| location.code == code)
}
