pub mod scan_queries;
