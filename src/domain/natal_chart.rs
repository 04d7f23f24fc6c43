//! Natal chart lookup tables: heavenly stem, four transformations and the
//! finance-palace star.
//!
//! The stem is taken as `birth_year mod 10` indexed into 甲..癸. This is a
//! fixed table, not the lunar-calendar reckoning.

use std::fmt;

use super::modifier::Modifier;

pub const DEFAULT_BIRTH_YEAR: i32 = 1990;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeavenlyStem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

impl HeavenlyStem {
    const ORDER: [HeavenlyStem; 10] = [
        HeavenlyStem::Jia,
        HeavenlyStem::Yi,
        HeavenlyStem::Bing,
        HeavenlyStem::Ding,
        HeavenlyStem::Wu,
        HeavenlyStem::Ji,
        HeavenlyStem::Geng,
        HeavenlyStem::Xin,
        HeavenlyStem::Ren,
        HeavenlyStem::Gui,
    ];

    pub fn from_year(year: i32) -> Self {
        Self::ORDER[year.rem_euclid(10) as usize]
    }

    pub fn hanzi(self) -> &'static str {
        match self {
            HeavenlyStem::Jia => "甲",
            HeavenlyStem::Yi => "乙",
            HeavenlyStem::Bing => "丙",
            HeavenlyStem::Ding => "丁",
            HeavenlyStem::Wu => "戊",
            HeavenlyStem::Ji => "己",
            HeavenlyStem::Geng => "庚",
            HeavenlyStem::Xin => "辛",
            HeavenlyStem::Ren => "壬",
            HeavenlyStem::Gui => "癸",
        }
    }
}

impl fmt::Display for HeavenlyStem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanzi())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Star {
    LianZhen,
    PoJun,
    WuQu,
    TaiYang,
    ZiWei,
    TianJi,
    TaiYin,
    JuMen,
    TianTong,
}

impl Star {
    pub fn hanzi(self) -> &'static str {
        match self {
            Star::LianZhen => "廉贞",
            Star::PoJun => "破军",
            Star::WuQu => "武曲",
            Star::TaiYang => "太阳",
            Star::ZiWei => "紫微",
            Star::TianJi => "天机",
            Star::TaiYin => "太阴",
            Star::JuMen => "巨门",
            Star::TianTong => "天同",
        }
    }
}

impl fmt::Display for Star {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanzi())
    }
}

/// 禄 / 权 / 科 / 忌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transformation {
    Lu,
    Quan,
    Ke,
    Ji,
}

impl Transformation {
    pub fn hanzi(self) -> &'static str {
        match self {
            Transformation::Lu => "禄",
            Transformation::Quan => "权",
            Transformation::Ke => "科",
            Transformation::Ji => "忌",
        }
    }

    pub fn modifier(self) -> Modifier {
        match self {
            Transformation::Lu => Modifier::Prosperity,
            Transformation::Quan => Modifier::Authority,
            Transformation::Ke => Modifier::Status,
            Transformation::Ji => Modifier::Taboo,
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hanzi())
    }
}

/// Four-transformations table for a stem. Only 甲, 乙 and 丙 are charted.
pub fn four_transformations(stem: HeavenlyStem) -> &'static [(Star, Transformation)] {
    use Star::*;
    use Transformation::*;
    match stem {
        HeavenlyStem::Jia => &[(LianZhen, Lu), (PoJun, Quan), (WuQu, Ke), (TaiYang, Ji)],
        HeavenlyStem::Yi => &[(ZiWei, Lu), (TianJi, Quan), (TaiYin, Ke), (JuMen, Ji)],
        HeavenlyStem::Bing => &[(TianTong, Lu), (LianZhen, Quan), (WuQu, Ke), (TaiYang, Ji)],
        _ => &[],
    }
}

pub fn finance_star(stem: HeavenlyStem) -> Star {
    match stem {
        HeavenlyStem::Jia => Star::WuQu,
        HeavenlyStem::Yi => Star::TaiYin,
        HeavenlyStem::Bing => Star::LianZhen,
        _ => Star::WuQu,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NatalChart {
    pub birth_year: i32,
}

impl NatalChart {
    pub fn new(birth_year: i32) -> Self {
        NatalChart { birth_year }
    }

    pub fn stem(&self) -> HeavenlyStem {
        HeavenlyStem::from_year(self.birth_year)
    }

    pub fn finance_star(&self) -> Star {
        finance_star(self.stem())
    }

    /// The finance star's transformation, if the stem's table lists it.
    pub fn finance_transformation(&self) -> Option<Transformation> {
        let star = self.finance_star();
        four_transformations(self.stem())
            .iter()
            .find(|(s, _)| *s == star)
            .map(|&(_, t)| t)
    }

    pub fn modifier(&self) -> Modifier {
        self.finance_transformation()
            .map(Transformation::modifier)
            .unwrap_or(Modifier::None)
    }
}

impl Default for NatalChart {
    fn default() -> Self {
        NatalChart::new(DEFAULT_BIRTH_YEAR)
    }
}
