pub mod oracle_worker;
