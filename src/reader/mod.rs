pub mod eigenstrat;

pub(crate) use eigenstrat::{read_eigenstrat_geno, read_eigenstrat_ind, read_eigenstrat_snp};
