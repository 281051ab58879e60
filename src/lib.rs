pub mod shared {
    pub mod infrastructure {
        pub mod notification_sink;
        pub mod participation_store;
    }
}

pub mod modules {
    pub mod attendance {
        pub mod core {
            pub mod identifier;
            pub mod matcher;
            pub mod notifications;
            pub mod participation;
            pub mod policy;
            pub mod record;
            pub mod session;
        }
        pub mod use_cases {
            pub mod ingest_spreadsheet {
                pub mod handler;
                pub mod header;
                pub mod ingestor;
                pub mod reader_port;
                pub mod rows;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod auto_process_pending {
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_pending_participations {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod stream_notifications {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod spreadsheet_reader;
            }
        }
    }
}

pub mod shell;
