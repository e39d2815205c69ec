use ics::{
    properties::{Categories, DtEnd, DtStart, Summary},
    ICalendar,
};

use crate::{CalendarEvent, CalendarManager};

const FORMAT: &str = "%Y%m%dT%H%M%S";

/// Builds an iCalendar with floating (local wall-clock) times.
#[must_use]
pub fn to_ics<'a, I>(name: &'a str, events: I) -> ICalendar<'a>
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    let mut icalendar = ICalendar::new("2.0", name);

    for event in events {
        icalendar.add_event(event.to_ics());
    }

    icalendar
}

impl CalendarManager {
    #[must_use]
    pub fn to_ics<'a>(&'a self, name: &'a str) -> ICalendar<'a> {
        to_ics(name, self.events())
    }
}

impl CalendarEvent {
    #[must_use]
    pub fn to_ics(&self) -> ics::Event<'_> {
        let start = self.start.format(FORMAT).to_string();
        let end = self.end.format(FORMAT).to_string();

        let id = format!("wellness-{}", self.id());

        let mut ics_event = ics::Event::new(id, start.clone());

        ics_event.push(DtStart::new(start));
        ics_event.push(DtEnd::new(end));
        ics_event.push(Summary::new(&self.title));
        ics_event.push(Categories::new(self.kind.label()));

        ics_event
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{sample_recipes, CalendarManager};

    #[test]
    fn exports_every_event_with_floating_times() {
        let mut manager = CalendarManager::new();
        let start = NaiveDate::from_ymd_opt(2024, 10, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let id = manager.schedule_meal(&sample_recipes()[2], start);

        let ics = manager.to_ics("Wellness").to_string();

        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains(&format!("UID:wellness-{id}")));
        assert!(ics.contains("DTSTART:20241001T120000"));
        assert!(ics.contains("DTEND:20241001T123000"));
        assert!(ics.contains("SUMMARY:Baked Salmon & Greens"));
        assert!(ics.contains("CATEGORIES:Meal"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
    }
}
