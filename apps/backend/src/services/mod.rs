pub mod gold_codes;
