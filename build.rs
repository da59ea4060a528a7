use cfg_aliases::cfg_aliases;

fn main() {
    cfg_aliases! {
        // Second analog enable register, ADC10AE1. Only present on some variants.
        ae1: { any(feature = "f22x4", feature = "g2x44", feature = "g2x55") },
    }
}
