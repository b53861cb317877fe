//! ISO 4217 currency codes.
//!
//! The set is closed: anything outside the table is rejected when parsing.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a string is not a supported currency code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown currency code: {0}")]
pub struct UnknownCurrencyCode(pub String);

macro_rules! currency_codes {
    ($($variant:ident => $code:literal, $name:literal;)+) => {
        /// ISO 4217 currency codes supported by the system.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum CurrencyCode {
            $(
                #[doc = $name]
                $variant,
            )+
        }

        impl CurrencyCode {
            /// Every supported code, in table order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the three letter ISO code.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl FromStr for CurrencyCode {
            type Err = UnknownCurrencyCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_uppercase().as_str() {
                    $($code => Ok(Self::$variant),)+
                    _ => Err(UnknownCurrencyCode(s.to_string())),
                }
            }
        }
    };
}

currency_codes! {
    Aed => "AED", "UAE Dirham";
    Afn => "AFN", "Afghani";
    All => "ALL", "Lek";
    Amd => "AMD", "Armenian Dram";
    Ang => "ANG", "Netherlands Antillean Guilder";
    Aoa => "AOA", "Kwanza";
    Ars => "ARS", "Argentine Peso";
    Aud => "AUD", "Australian Dollar";
    Awg => "AWG", "Aruban Florin";
    Azn => "AZN", "Azerbaijan Manat";
    Bam => "BAM", "Convertible Mark";
    Bbd => "BBD", "Barbados Dollar";
    Bdt => "BDT", "Taka";
    Bgn => "BGN", "Bulgarian Lev";
    Bhd => "BHD", "Bahraini Dinar";
    Bif => "BIF", "Burundi Franc";
    Bmd => "BMD", "Bermudian Dollar";
    Bnd => "BND", "Brunei Dollar";
    Bob => "BOB", "Boliviano";
    Brl => "BRL", "Brazilian Real";
    Bsd => "BSD", "Bahamian Dollar";
    Btn => "BTN", "Ngultrum";
    Bwp => "BWP", "Pula";
    Byn => "BYN", "Belarusian Ruble";
    Bzd => "BZD", "Belize Dollar";
    Cad => "CAD", "Canadian Dollar";
    Cdf => "CDF", "Congolese Franc";
    Chf => "CHF", "Swiss Franc";
    Clp => "CLP", "Chilean Peso";
    Cny => "CNY", "Yuan Renminbi";
    Cop => "COP", "Colombian Peso";
    Crc => "CRC", "Costa Rican Colon";
    Cup => "CUP", "Cuban Peso";
    Cve => "CVE", "Cabo Verde Escudo";
    Czk => "CZK", "Czech Koruna";
    Djf => "DJF", "Djibouti Franc";
    Dkk => "DKK", "Danish Krone";
    Dop => "DOP", "Dominican Peso";
    Dzd => "DZD", "Algerian Dinar";
    Egp => "EGP", "Egyptian Pound";
    Ern => "ERN", "Nakfa";
    Etb => "ETB", "Ethiopian Birr";
    Eur => "EUR", "Euro";
    Fjd => "FJD", "Fiji Dollar";
    Fkp => "FKP", "Falkland Islands Pound";
    Gbp => "GBP", "Pound Sterling";
    Gel => "GEL", "Lari";
    Ghs => "GHS", "Ghana Cedi";
    Gip => "GIP", "Gibraltar Pound";
    Gmd => "GMD", "Dalasi";
    Gnf => "GNF", "Guinean Franc";
    Gtq => "GTQ", "Quetzal";
    Gyd => "GYD", "Guyana Dollar";
    Hkd => "HKD", "Hong Kong Dollar";
    Hnl => "HNL", "Lempira";
    Htg => "HTG", "Gourde";
    Huf => "HUF", "Forint";
    Idr => "IDR", "Rupiah";
    Ils => "ILS", "New Israeli Sheqel";
    Inr => "INR", "Indian Rupee";
    Iqd => "IQD", "Iraqi Dinar";
    Irr => "IRR", "Iranian Rial";
    Isk => "ISK", "Iceland Krona";
    Jmd => "JMD", "Jamaican Dollar";
    Jod => "JOD", "Jordanian Dinar";
    Jpy => "JPY", "Yen";
    Kes => "KES", "Kenyan Shilling";
    Kgs => "KGS", "Som";
    Khr => "KHR", "Riel";
    Kmf => "KMF", "Comorian Franc";
    Kpw => "KPW", "North Korean Won";
    Krw => "KRW", "Won";
    Kwd => "KWD", "Kuwaiti Dinar";
    Kyd => "KYD", "Cayman Islands Dollar";
    Kzt => "KZT", "Tenge";
    Lak => "LAK", "Lao Kip";
    Lbp => "LBP", "Lebanese Pound";
    Lkr => "LKR", "Sri Lanka Rupee";
    Lrd => "LRD", "Liberian Dollar";
    Lsl => "LSL", "Loti";
    Lyd => "LYD", "Libyan Dinar";
    Mad => "MAD", "Moroccan Dirham";
    Mdl => "MDL", "Moldovan Leu";
    Mga => "MGA", "Malagasy Ariary";
    Mkd => "MKD", "Denar";
    Mmk => "MMK", "Kyat";
    Mnt => "MNT", "Tugrik";
    Mop => "MOP", "Pataca";
    Mru => "MRU", "Ouguiya";
    Mur => "MUR", "Mauritius Rupee";
    Mvr => "MVR", "Rufiyaa";
    Mwk => "MWK", "Malawi Kwacha";
    Mxn => "MXN", "Mexican Peso";
    Myr => "MYR", "Malaysian Ringgit";
    Mzn => "MZN", "Mozambique Metical";
    Nad => "NAD", "Namibia Dollar";
    Ngn => "NGN", "Naira";
    Nio => "NIO", "Cordoba Oro";
    Nok => "NOK", "Norwegian Krone";
    Npr => "NPR", "Nepalese Rupee";
    Nzd => "NZD", "New Zealand Dollar";
    Omr => "OMR", "Rial Omani";
    Pab => "PAB", "Balboa";
    Pen => "PEN", "Sol";
    Pgk => "PGK", "Kina";
    Php => "PHP", "Philippine Peso";
    Pkr => "PKR", "Pakistan Rupee";
    Pln => "PLN", "Zloty";
    Pyg => "PYG", "Guarani";
    Qar => "QAR", "Qatari Rial";
    Ron => "RON", "Romanian Leu";
    Rsd => "RSD", "Serbian Dinar";
    Rub => "RUB", "Russian Ruble";
    Rwf => "RWF", "Rwanda Franc";
    Sar => "SAR", "Saudi Riyal";
    Sbd => "SBD", "Solomon Islands Dollar";
    Scr => "SCR", "Seychelles Rupee";
    Sdg => "SDG", "Sudanese Pound";
    Sek => "SEK", "Swedish Krona";
    Sgd => "SGD", "Singapore Dollar";
    Shp => "SHP", "Saint Helena Pound";
    Sle => "SLE", "Leone";
    Sos => "SOS", "Somali Shilling";
    Srd => "SRD", "Surinam Dollar";
    Ssp => "SSP", "South Sudanese Pound";
    Stn => "STN", "Dobra";
    Syp => "SYP", "Syrian Pound";
    Szl => "SZL", "Lilangeni";
    Thb => "THB", "Baht";
    Tjs => "TJS", "Somoni";
    Tmt => "TMT", "Turkmenistan New Manat";
    Tnd => "TND", "Tunisian Dinar";
    Top => "TOP", "Pa'anga";
    Try => "TRY", "Turkish Lira";
    Ttd => "TTD", "Trinidad and Tobago Dollar";
    Twd => "TWD", "New Taiwan Dollar";
    Tzs => "TZS", "Tanzanian Shilling";
    Uah => "UAH", "Hryvnia";
    Ugx => "UGX", "Uganda Shilling";
    Usd => "USD", "US Dollar";
    Uyu => "UYU", "Peso Uruguayo";
    Uzs => "UZS", "Uzbekistan Sum";
    Ves => "VES", "Bolivar Soberano";
    Vnd => "VND", "Dong";
    Vuv => "VUV", "Vatu";
    Wst => "WST", "Tala";
    Xaf => "XAF", "CFA Franc BEAC";
    Xcd => "XCD", "East Caribbean Dollar";
    Xof => "XOF", "CFA Franc BCEAO";
    Xpf => "XPF", "CFP Franc";
    Yer => "YER", "Yemeni Rial";
    Zar => "ZAR", "Rand";
    Zmw => "ZMW", "Zambian Kwacha";
    Zwl => "ZWL", "Zimbabwe Dollar";
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}
