//! Literal functions and references for every built-in unit, generated
//! from one table so the two sets always name the same units.

#![allow(non_snake_case)]

macro_rules! builtin_units {
    ($($literal:ident, $reference:ident => $key:literal;)*) => {
        /// Literal functions: `q_KiB(4)` is four kibibytes in whatever
        /// representation the argument has (`q_KiB(4i64)`, `q_KiB(4.0)`).
        pub mod literals {
            use quanta_units::{Quantity, Representation};

            use crate::builtin;

            $(
                #[doc = concat!("Quantity in `", $key, "`")]
                pub fn $literal<R: Representation>(value: R) -> Quantity<R> {
                    Quantity::new(value, builtin($key))
                }
            )*
        }

        /// References to built-in units, for `10 * &Kib_per_s()`
        pub mod references {
            use quanta_units::Reference;

            use crate::builtin;

            $(
                #[doc = concat!("Reference to `", $key, "`")]
                pub fn $reference() -> Reference {
                    Reference::new(builtin($key))
                }
            )*
        }

        #[cfg(test)]
        const KEYS: &[&str] = &[$($key),*];
    };
}

builtin_units! {
    // SI
    q_m, m => "m";
    q_km, km => "km";
    q_cm, cm => "cm";
    q_mm, mm => "mm";
    q_kg, kg => "kg";
    q_g, g => "g";
    q_s, s => "s";
    q_min, min => "min";
    q_h, h => "h";
    q_rad, rad => "rad";
    q_deg, deg => "deg";
    q_rev, rev => "rev";
    q_m_per_s, m_per_s => "m/s";
    q_km_per_h, km_per_h => "km/h";
    q_m_per_s2, m_per_s2 => "m/s^2";
    q_N, N => "N";

    // CGS
    q_cgs_cm, cgs_cm => "cgs:cm";
    q_cgs_m, cgs_m => "cgs:m";
    q_cgs_g, cgs_g => "cgs:g";
    q_cgs_cm_per_s, cgs_cm_per_s => "cgs:cm/s";
    q_dyn, dyne => "cgs:dyn";

    // Information
    q_b, b => "b";
    q_kb, kb => "kb";
    q_Mb, Mb => "Mb";
    q_Gb, Gb => "Gb";
    q_Tb, Tb => "Tb";
    q_Pb, Pb => "Pb";
    q_Eb, Eb => "Eb";
    q_Kib, Kib => "Kib";
    q_Mib, Mib => "Mib";
    q_Gib, Gib => "Gib";
    q_Tib, Tib => "Tib";
    q_Pib, Pib => "Pib";
    q_Eib, Eib => "Eib";
    q_B, B => "B";
    q_kB, kB => "kB";
    q_MB, MB => "MB";
    q_GB, GB => "GB";
    q_TB, TB => "TB";
    q_PB, PB => "PB";
    q_EB, EB => "EB";
    q_KiB, KiB => "KiB";
    q_MiB, MiB => "MiB";
    q_GiB, GiB => "GiB";
    q_TiB, TiB => "TiB";
    q_PiB, PiB => "PiB";
    q_EiB, EiB => "EiB";

    // Bitrate
    q_b_per_s, b_per_s => "b/s";
    q_kb_per_s, kb_per_s => "kb/s";
    q_Mb_per_s, Mb_per_s => "Mb/s";
    q_Gb_per_s, Gb_per_s => "Gb/s";
    q_Tb_per_s, Tb_per_s => "Tb/s";
    q_Pb_per_s, Pb_per_s => "Pb/s";
    q_Kib_per_s, Kib_per_s => "Kib/s";
    q_Mib_per_s, Mib_per_s => "Mib/s";
    q_Gib_per_s, Gib_per_s => "Gib/s";
    q_Tib_per_s, Tib_per_s => "Tib/s";
    q_Pib_per_s, Pib_per_s => "Pib/s";
    q_B_per_s, B_per_s => "B/s";
    q_kB_per_s, kB_per_s => "kB/s";
    q_MB_per_s, MB_per_s => "MB/s";
    q_GB_per_s, GB_per_s => "GB/s";
    q_TB_per_s, TB_per_s => "TB/s";
    q_PB_per_s, PB_per_s => "PB/s";
    q_KiB_per_s, KiB_per_s => "KiB/s";
    q_MiB_per_s, MiB_per_s => "MiB/s";
    q_GiB_per_s, GiB_per_s => "GiB/s";
    q_TiB_per_s, TiB_per_s => "TiB/s";
    q_PiB_per_s, PiB_per_s => "PiB/s";
}
