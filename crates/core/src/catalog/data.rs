use super::{UniverseCatalog, UniverseCatalogBuilder};
use crate::domain::AssetClass;
use crate::risk::RiskLevel;

// Each bucket lists its ESG-screened instruments first (see ESG_SLEEVE_LEN).
const EUROPE_ETF: &[&str] = &[
    "IESG.L", "IUSK.DE", "IUSK.F", "IESE.AS", "IDSE.AS", "IEUR", "VWCE.DE", "EXW1.DE", "DBX1.DE",
    "CSP1.L", "XESC.DE", "SXR8.DE", "EUNL.DE", "IWDA.AS", "EUN2.DE",
];
const EUROPE_BONDS: &[&str] = &[
    "GRNB.L", "EMB", "AGGG.L", "USAG.SW", "BGRN", "EBND.DE", "EUNA.DE", "BND", "AGG", "XG7S.DE",
    "IBCI.DE", "IBGS.DE", "XDWD.DE", "VETY.DE", "DBEF.DE",
];
const EUROPE_STOCKS: &[&str] = &[
    "ORSTED.CO", "ADS.DE", "PHIA.AS", "SIE.DE", "SAP.DE", "ASML.AS", "LIN.DE", "NOVO-B.CO", "OR.PA",
    "AD.AS", "NESN.SW", "VIV.PA", "BMW.DE", "SHEL.L", "SU.TO",
];

const NORTH_AMERICA_ETF: &[&str] = &[
    "SUSA", "ESGV", "SPYL.DE", "SPY", "QQQ", "VTI", "IVV", "DIA", "IWM", "XLF", "XLK", "XLV", "VOO",
    "CSP1.L", "IWDA.AS",
];
const NORTH_AMERICA_BONDS: &[&str] = &[
    "BGRN", "USAG.SW", "IGSB", "SJNK", "AGG", "BND", "TLT", "LQD", "HYG", "BNDX", "MBB", "TIP",
    "SHY", "EMB", "SPDR_BRE",
];
const NORTH_AMERICA_STOCKS: &[&str] = &[
    "AAPL", "MSFT", "ADBE", "CRM", "JNJ", "AMZN", "GOOGL", "JPM", "XOM", "TSLA", "BRK-B", "META",
    "NVDA", "PG", "UNH",
];

const EMERGING_ETF: &[&str] = &[
    "ESGE", "EEMX", "EEM", "VWO", "IEMG", "EMQQ", "SCHE", "XMME.DE", "EEMS", "EMXC", "HMEF.L", "EMB",
    "VWOB", "IGOV", "PCY",
];
const EMERGING_BONDS: &[&str] = &[
    "HYGD", "EMBB", "IGOV", "EMLC", "EMHY", "ILTB", "EMB", "VWOB", "SCHP", "TIP", "BGRN", "AGG",
    "BND", "TLT", "LQD",
];
const EMERGING_STOCKS: &[&str] = &[
    "TSM", "BABA", "INFY.NS", "TCS.NS", "VALE3.SA", "NIO", "HDFCBANK.NS", "TCEHY", "005930.KS",
    "601318.SS", "ITUB", "PBR", "MTN", "SU.TO", "GOLD",
];

// (region, defensive, balanced, growth)
const PRIMARIES: &[(&str, &str, &str, &str)] = &[
    ("Europe", "EBND.DE", "IEUR", "IWDA.AS"),
    ("North America", "SHY", "SPY", "IWM"),
    ("Emerging Markets", "EMB", "IEMG", "EEMS"),
];

// Display metadata covers only a handful of tickers; the rest use the fallback.
const PRODUCTS: &[(&str, &str, &str)] = &[
    ("EBND.DE", "iShares Core € Govt Bond UCITS ETF", "Bond ETF"),
    ("EUNA.DE", "iShares Euro Corporate Bond UCITS ETF", "Bond ETF"),
    ("IEUR", "iShares Core MSCI Europe ETF", "ETF"),
    ("SPY", "SPDR S&P 500 ETF Trust", "ETF"),
    ("IWM", "iShares Russell 2000 ETF", "ETF"),
    ("QQQ", "Invesco QQQ Trust", "ETF"),
    ("VTI", "Vanguard Total Stock Market ETF", "ETF"),
    ("AGG", "iShares Core U.S. Aggregate Bond ETF", "Bond ETF"),
    ("IEMG", "iShares Core MSCI Emerging Markets ETF", "ETF"),
    ("EEM", "iShares MSCI Emerging Markets ETF", "ETF"),
    ("VWO", "Vanguard FTSE Emerging Markets ETF", "ETF"),
    ("SHY", "iShares 1-3 Year Treasury Bond ETF", "Bond ETF"),
    ("BND", "Vanguard Total Bond Market ETF", "Bond ETF"),
    ("EMB", "iShares JP Morgan USD Emerging Markets Bond ETF", "Bond ETF"),
    ("VWOB", "Vanguard Emerging Markets Government Bond ETF", "Bond ETF"),
    ("EEMS", "iShares MSCI Emerging Markets Small-Cap ETF", "ETF"),
];

pub(super) fn builtin_catalog() -> UniverseCatalog {
    let mut b: UniverseCatalogBuilder = UniverseCatalog::builder()
        .bucket("Europe", AssetClass::Etf, EUROPE_ETF.iter().copied())
        .bucket("Europe", AssetClass::Bonds, EUROPE_BONDS.iter().copied())
        .bucket("Europe", AssetClass::Stocks, EUROPE_STOCKS.iter().copied())
        .bucket("North America", AssetClass::Etf, NORTH_AMERICA_ETF.iter().copied())
        .bucket("North America", AssetClass::Bonds, NORTH_AMERICA_BONDS.iter().copied())
        .bucket("North America", AssetClass::Stocks, NORTH_AMERICA_STOCKS.iter().copied())
        .bucket("Emerging Markets", AssetClass::Etf, EMERGING_ETF.iter().copied())
        .bucket("Emerging Markets", AssetClass::Bonds, EMERGING_BONDS.iter().copied())
        .bucket("Emerging Markets", AssetClass::Stocks, EMERGING_STOCKS.iter().copied())
        .any_primary(RiskLevel::BALANCED.label(), "EUNL.DE");

    for (region, defensive, balanced, growth) in PRIMARIES {
        b = b
            .primary(region, RiskLevel::DEFENSIVE, defensive)
            .primary(region, RiskLevel::BALANCED, balanced)
            .primary(region, RiskLevel::GROWTH, growth);
    }

    for (ticker, name, category) in PRODUCTS {
        b = b.product(ticker, name, category);
    }

    b.build()
}
